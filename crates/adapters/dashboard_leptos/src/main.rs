fn main() {
    frostwatch_dashboard::start();
}
