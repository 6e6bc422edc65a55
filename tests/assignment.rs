#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        associativity in assignment is OK
        "c"
        "c"
        "c"
    }

    tests! {
        syntax in assignment is OK
        "after"
        "arg"
        "arg"
    }

    tests! {
        global in assignment is OK
        "before"
        "after"
        "arg"
        "arg"
    }

    tests! {
        local in assignment is OK
        "before"
        "after"
        "arg"
        "arg"
    }

    tests! {
        grouping in assignment is ERR
        "[line 2:5] Error at '=': Invalid assignment target"
    }

    tests! {
        infix_operator in assignment is ERR
        "[line 3:7] Error at '=': Invalid assignment target"
    }

    tests! {
        to_this in assignment is ERR
        "[line 3:14] Error at '=': Invalid assignment target"
    }

    tests! {
        undefined in assignment is ERR
        "[line 1:1] Error at 'unknown': Undefined variable 'unknown'"
    }
}
