fn main() {
    rollcall_frontend::boot();
}
