use assert_cmd::Command;

#[test]
fn static_error_exits_65() {
    Command::cargo_bin("flint").unwrap()
        .arg("tests/target/misc/unexpected_character.flint")
        .assert()
        .code(65);
}

#[test]
fn runtime_error_exits_70() {
    Command::cargo_bin("flint").unwrap()
        .arg("tests/target/variable/undefined_global.flint")
        .assert()
        .code(70);
}

#[test]
fn clean_script_exits_0() {
    Command::cargo_bin("flint").unwrap()
        .arg("tests/target/operator/add.flint")
        .assert()
        .success()
        .stdout("3\n579\nstring\n");
}

#[test]
fn extra_arguments_exit_64() {
    Command::cargo_bin("flint").unwrap()
        .args(["a.flint", "b.flint"])
        .assert()
        .code(64)
        .stdout("Usage: flint [script]\n");
}
