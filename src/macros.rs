// Entry-point macros. All of them capture the invocation site through `file!()`,
// `line!()` and `column!()`, which report the outermost macro call in user code.

/// Path of the function the macro is expanded in, e.g. `my_app::net::dial`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __qq_marker() {}
        fn __qq_type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::domain::call_site::enclosing_function(__qq_type_name_of(__qq_marker))
    }};
}

/// [`CallSite`](crate::CallSite) of the invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::core::file!(), ::core::line!(), $crate::function_name!())
            .with_column(::core::column!())
            .with_manifest_dir(::core::option_env!("CARGO_MANIFEST_DIR"))
    };
}

/// Log every argument as `expression=value` to the qq log file.
///
/// A failed write is reported on stderr, or panics when `Config::fail_fast` is set.
///
/// ```no_run
/// use qq::qq;
///
/// let ip = "1.2.3.4";
/// let port = 443;
/// qq!(ip, port, 5432); // ip="1.2.3.4" port=443 5432
/// ```
#[macro_export]
macro_rules! qq {
    ($($arg:expr),* $(,)?) => {
        $crate::application::log_or_report(
            $crate::call_site!(),
            &[$(&$arg as &dyn ::core::fmt::Debug),*],
        )
    };
}

/// Like [`qq!`], but hands the write result back instead of handling it.
#[macro_export]
macro_rules! try_qq {
    ($($arg:expr),* $(,)?) => {
        $crate::application::try_log(
            $crate::call_site!(),
            &[$(&$arg as &dyn ::core::fmt::Debug),*],
        )
    };
}
