//! Architecture-specific interrupt masking.

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "arm", target_os = "none"))] {
        pub mod cortex_m;
    }
}
