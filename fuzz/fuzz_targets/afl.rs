use afl::fuzz;

fn main() {
    fuzz!(|data: &[u8]| {
        ev_nbt_fuzz::test(data);
    });
}
