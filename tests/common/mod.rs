use std::sync::Once;

#[allow(dead_code)]
static INIT: Once = Once::new();

/// Initialize logging once for the whole test binary, silenced by default.
#[allow(dead_code)]
pub fn setup_test_env() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
            .is_test(true)
            .init();
    });
}
