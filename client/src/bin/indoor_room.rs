//! Small furnished room: walk, jump, and climb onto the furniture.

fn main() {
    client::run(shared::indoor_room());
}
