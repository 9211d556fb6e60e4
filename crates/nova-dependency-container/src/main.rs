fn main() -> anyhow::Result<()> {
    nova_dependency_container::cli::main()
}
