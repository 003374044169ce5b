/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` defines a configuration structure with its defaults in a
/// single declaration and generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde serialization/deserialization with `#[serde(default)]`
///
/// # Example
/// ```
/// coinfolio::config_struct! {
///     pub struct GatewayLimits {
///         cache_ttl_secs: u64 = 300,
///         min_request_interval_ms: u64 = 1000,
///     }
/// }
///
/// let limits = GatewayLimits::default();
/// assert_eq!(limits.cache_ttl_secs, 300);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
