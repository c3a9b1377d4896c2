// ABOUTME: Compile-level checks on the runtime capability traits.
// ABOUTME: Verifies BollardRuntime satisfies every bound the archive adapters need.

use wocker::archive::{ImageArchiver, LoadCapable, SaveCapable, VolumeArchiver};
use wocker::runtime::{BollardRuntime, FullRuntime, ImageOps, RuntimeInfoTrait, VolumeOps};

fn assert_full_runtime<T: FullRuntime>() {}
fn assert_image_ops<T: ImageOps + ?Sized>() {}
fn assert_volume_ops<T: VolumeOps + ?Sized>() {}
fn assert_runtime_info<T: RuntimeInfoTrait + ?Sized>() {}
fn assert_save_and_load<T: SaveCapable + LoadCapable>() {}
fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn bollard_runtime_implements_all_capabilities() {
    assert_full_runtime::<BollardRuntime>();
    assert_image_ops::<BollardRuntime>();
    assert_volume_ops::<BollardRuntime>();
    assert_runtime_info::<BollardRuntime>();
}

#[test]
fn capability_traits_are_object_safe() {
    assert_image_ops::<dyn ImageOps>();
    assert_volume_ops::<dyn VolumeOps>();
    assert_runtime_info::<dyn RuntimeInfoTrait>();
}

#[test]
fn archivers_drive_batches() {
    assert_save_and_load::<ImageArchiver<'static, BollardRuntime>>();
    assert_save_and_load::<VolumeArchiver<'static, BollardRuntime>>();
}

#[test]
fn runtime_is_shareable() {
    assert_send_sync::<BollardRuntime>();
}
