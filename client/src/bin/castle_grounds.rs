//! Castle on a grassy plain, explored with the third-person character.

fn main() {
    client::run(shared::castle_grounds());
}
