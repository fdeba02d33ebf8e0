#[macro_export]
macro_rules! opt {
    (, $default:ident) => {
        $default
    };
    ($optional:expr, $default:ident) => {
        $optional
    };
}

#[macro_export]
macro_rules! params_internal {
    ($vec:ident, required, $key:expr, $val:expr) => {
        $vec.push(($key, $val.to_string()));
    };
    ($vec:ident, optional, $key:expr, $val:expr) => {
        if let Some(ref v) = $val {
            $vec.push(($key, v.to_string()));
        }
    };
}

/// Build the query string pairs of a REST endpoint. Keys are the stringified names,
/// values are anything implementing `ToString`. Example:
/// ```
/// use thread_util::build_params;
///
/// let id = 20u64;
/// let cursor: Option<&str> = None;
/// let params = build_params! {
///     required id,
///     required tweet_mode => "extended",
///     optional cursor,
/// };
/// assert_eq!(params, vec![("id", "20".to_string()), ("tweet_mode", "extended".to_string())]);
/// ```
#[macro_export]
macro_rules! build_params {
    (
        $(
            $kind:ident $name:ident $( => $val:expr )?
        ),+ $(,)?
    ) => {
        {
            let mut params: Vec<(&'static str, String)> = Vec::new();
            $(
                $crate::params_internal!(
                    params,
                    $kind,
                    stringify!($name),
                    $crate::opt!($( $val )?, $name)
                );
            )+
            params
        }
    };
}
