fn main() {
    changescan::app::startup::startup();
}
