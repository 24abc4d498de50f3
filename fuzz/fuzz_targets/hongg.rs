use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            ev_nbt_fuzz::test(data);
        });
    }
}
