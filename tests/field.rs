#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        cake in field is OK
        "The German chocolate cake is delicious!"
    }

    tests! {
        call_function_field in field is OK
        "bar"
        "1"
        "2"
    }

    tests! {
        method_binds_this in field is OK
        "foo1"
        "method"
    }

    tests! {
        on_instance in field is OK
        "bar value"
        "baz value"
        "bar value"
        "baz value"
    }

    tests! {
        fields_shadow_methods in field is OK
        "field"
    }

    tests! {
        get_on_bool in field is ERR
        "[line 1:6] Error at 'foo': Only instances have properties."
    }

    tests! {
        get_on_class in field is ERR
        "[line 2:5] Error at 'bar': Only instances have properties."
    }

    tests! {
        set_on_num in field is ERR
        "[line 1:5] Error at 'foo': Only instance have fields"
    }

    tests! {
        undefined in field is ERR
        "[line 4:5] Error at 'bar': Undefined property 'bar'."
    }
}
