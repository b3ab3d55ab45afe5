use starview::Viewer;

fn main() {
    env_logger::init();

    if let Err(e) = Viewer::builder().with_title("Starview").build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
