//! Castle-style hall with a tiled floor, carpet and pillars.

fn main() {
    client::run(shared::indoor_hall());
}
