#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        empty in class is OK
        "Foo"
    }

    tests! {
        instance in class is OK
        "Fooinstance"
    }

    tests! {
        local_reference_self in class is OK
        "Foo"
    }

    tests! {
        local_inherit_other in class is OK
        "B"
    }
}
