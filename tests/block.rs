#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope in block is OK
        "inner"
        "outer"
    }

    tests! {
        empty in block is OK
        "ok"
    }
}
