use clap::Args;

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Container ID
    pub id: String,

    /// Image the rootfs is prepared from
    pub image: String,
}

pub fn execute(args: PrepareArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let driver = global.create_driver()?;
    let rootfs = driver.generate_rootfs(&args.id, &args.image)?;
    println!("{}", rootfs.display());
    Ok(())
}
