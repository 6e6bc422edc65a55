#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_methods in inheritance is OK
        "foo"
        "bar"
        "bar"
    }

    tests! {
        set_fields_from_base_class in inheritance is OK
        "foo 1"
        "foo 2"
        "bar 1"
        "bar 2"
    }

    tests! {
        constructor in inheritance is OK
        "value"
    }

    tests! {
        inherit_from_self in inheritance is ERR
        "[line 1:13] Error at 'Foo': A class cannot inherit from itself"
    }

    tests! {
        inherit_from_number in inheritance is ERR
        "[line 2:13] Error at 'Number': Superclass must be a class"
    }

    tests! {
        inherit_from_function in inheritance is ERR
        "[line 3:18] Error at 'foo': Superclass must be a class"
    }

    tests! {
        parenthesized_superclass in inheritance is ERR
        "[line 1:13] Error at '(': Expected superclass name"
    }
}
