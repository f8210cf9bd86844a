fn main() {
    flappy_bird::run();
}
