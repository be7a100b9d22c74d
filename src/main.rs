fn main() {
    lox_testgen::cli::run();
}
