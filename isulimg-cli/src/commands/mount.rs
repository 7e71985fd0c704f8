use clap::Args;

#[derive(Args, Debug)]
pub struct MountArgs {
    /// Container ID
    pub id: String,

    /// Image the container rootfs was prepared from
    pub image: String,
}

/// Mount (`mount == true`) or unmount a container rootfs.
pub fn execute(
    args: MountArgs,
    global: &crate::cli::GlobalFlags,
    mount: bool,
) -> anyhow::Result<()> {
    let driver = global.create_driver()?;

    if mount {
        driver.mount_rootfs(&args.id, &args.image)?;
    } else {
        driver.umount_rootfs(&args.id, &args.image)?;
    }

    println!("{}", args.id);
    Ok(())
}
