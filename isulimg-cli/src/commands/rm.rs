use clap::Args;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// ID of the container(s) whose rootfs is removed
    #[arg(required = true, num_args = 1..)]
    pub targets: Vec<String>,
}

pub fn execute(args: RmArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let driver = global.create_driver()?;

    for target in args.targets {
        // Removal failures are logged by the driver and never abort the loop
        driver.cleanup_rootfs(&target);
        println!("{}", target);
    }

    Ok(())
}
