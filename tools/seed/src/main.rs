fn main() -> anyhow::Result<()> {
    kuma_seed::run()
}
