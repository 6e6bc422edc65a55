#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        arity in method is OK
        "no args"
        "1"
        "3"
    }

    tests! {
        extra_arguments in method is ERR
        "[line 5:21] Error at ')': Expected 2 arguments but got 3."
    }

    tests! {
        not_found in method is ERR
        "[line 2:7] Error at 'unknown': Undefined property 'unknown'."
    }

    tests! {
        print_bound_method in method is OK
        "<function method>"
    }
}
