/// Looks up a message in the current language. With `name = value` pairs the
/// `{name}` placeholders are filled in a single pass, so values are never re-expanded.
#[macro_export]
macro_rules! t {
    ($item:ident) => {{
        use $crate::localization::config::{get_lang, get_pack};
        get_pack().$item.get_translation(get_lang())
    }};

    ($item:ident, $($key:ident = $value:expr),+ $(,)?) => {{
        use $crate::localization::config::{get_lang, get_pack, render};
        render(
            get_pack().$item.get_translation(get_lang()),
            &[$((stringify!($key), $value.to_string())),+],
        )
    }};
}
