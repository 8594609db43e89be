/// MACROS
/// Cross-platform logging.
/// Goes to the browser console on the web and through `log` natively.
#[macro_export]
macro_rules! log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        ::log::info!($($t)*);
    }};
}
