//! Castle on a grassy plain, viewed with the free-fly editor camera.

fn main() {
    client::run(shared::castle_flyover());
}
