#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        empty_body in function is OK
        "nil"
    }

    tests! {
        print_function in function is OK
        "<function foo>"
        "<native function>"
    }

    tests! {
        parameters in function is OK
        "0"
        "1"
        "3"
    }

    tests! {
        recursion in function is OK
        "21"
    }

    tests! {
        local_recursion in function is OK
        "21"
    }

    tests! {
        mutual_recursion in function is OK
        "true"
        "true"
    }

    tests! {
        extra_arguments in function is ERR
        "[line 6:13] Error at ')': Expected 2 arguments but got 4."
    }

    tests! {
        missing_arguments in function is ERR
        "[line 3:4] Error at ')': Expected 2 arguments but got 1."
    }

    tests! {
        body_must_be_block in function is ERR
        "[line 1:9] Error at '123': Expected '{' before function body"
    }

    tests! {
        missing_comma_in_parameters in function is ERR
        "[line 1:14] Error at 'c': Expected ')' after parameters"
    }
}
