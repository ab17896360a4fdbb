use log::LevelFilter;
use shipshape::init_logging;

#[test]
fn test_level_comes_from_environment_and_first_init_wins() {
    std::env::set_var("SHIPSHAPE_LOG", "debug");
    init_logging();
    assert_eq!(log::max_level(), LevelFilter::Debug);

    std::env::set_var("SHIPSHAPE_LOG", "error");
    init_logging();
    assert_eq!(log::max_level(), LevelFilter::Debug);
}
