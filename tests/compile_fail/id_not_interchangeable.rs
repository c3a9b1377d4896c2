// ABOUTME: Compile-fail test verifying ImageId and ContainerId are not interchangeable.
// ABOUTME: This test should fail to compile, validating type safety.

use wocker::types::{ContainerId, ImageId};

fn takes_container_id(_id: ContainerId) {}

fn main() {
    let image_id = ImageId::new("0123456789ab");
    takes_container_id(image_id); // ERROR: expected ContainerId, found ImageId
}
