#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "3"
        "579"
        "string"
    }

    tests! {
        add_mixed in operator is ERR
        "[line 1:12] Error at '+': Operands must be two numbers or two strings."
    }

    tests! {
        subtract in operator is OK
        "1"
        "2"
    }

    tests! {
        multiply in operator is OK
        "15"
        "1.5"
    }

    tests! {
        multiply_nonnum in operator is ERR
        "[line 1:13] Error at '*': Operands must be numbers"
    }

    tests! {
        divide in operator is OK
        "4"
        "1.5"
        "inf"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
        "-3"
    }

    tests! {
        negate_nonnum in operator is ERR
        "[line 1:7] Error at '-': Operand must be a number"
    }

    tests! {
        comparison in operator is OK
        "true"
        "false"
        "false"
        "true"
        "true"
        "false"
        "false"
        "false"
        "true"
        "false"
        "true"
        "true"
    }

    tests! {
        comparison_string in operator is ERR
        "[line 1:11] Error at '<': Operands must be numbers"
    }

    tests! {
        equals in operator is OK
        "true"
        "true"
        "false"
        "true"
        "false"
        "true"
        "false"
        "false"
        "false"
        "false"
        "true"
        "false"
    }

    tests! {
        equals_class in operator is OK
        "true"
        "false"
        "true"
        "false"
        "false"
    }

    tests! {
        not in operator is OK
        "false"
        "true"
        "true"
        "true"
        "false"
        "false"
    }
}
