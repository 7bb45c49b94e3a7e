/// Emits a `tracing` event at `$level` under the `treelist_adapter` target.
///
/// Without the `tracing` feature the arguments are discarded unevaluated.
#[cfg(feature = "tracing")]
macro_rules! nav_log {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "treelist_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! nav_log {
    ($level:ident, $($tt:tt)*) => {};
}
