#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        default in constructor is OK
        "Fooinstance"
    }

    tests! {
        arguments in constructor is OK
        "init"
        "1"
        "2"
    }

    tests! {
        call_init_explicitly in constructor is OK
        "Foo.init(one)"
        "Foo.init(two)"
        "Fooinstance"
        "init"
    }

    tests! {
        default_arguments in constructor is ERR
        "[line 3:22] Error at ')': Expected 0 arguments but got 3."
    }

    tests! {
        early_return in constructor is OK
        "init"
        "Fooinstance"
    }

    tests! {
        return_value in constructor is ERR
        "[line 3:9] Error at 'return': Cannot return a value from an initializer"
    }

    tests! {
        return_in_nested_function in constructor is OK
        "bar"
        "Fooinstance"
    }

    tests! {
        extra_arguments in constructor is ERR
        "[line 8:25] Error at ')': Expected 2 arguments but got 4."
    }
}
