fn main() {
    mcpkg::run_cli();
}
