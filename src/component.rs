//! String conversion contract for URL-addressable values.
//!
//! Every dynamic path segment and query value passes through exactly one
//! [`UrlComponent`] implementation: `parse` turns the raw URL string into a
//! typed value, `render` turns the value back into the string that should
//! appear in the URL. Rendering is allowed to return `None`, which
//! suppresses emission entirely; that is how absent optionals vanish from
//! an encoded URL instead of serializing as a literal `"None"`.
//!
//! Implementations are provided for the primitive types a URL can carry
//! (strings, booleans, integer widths, floats) plus an [`Option`]
//! combinator. Enumeration-like types get an implementation from
//! `#[derive(UrlComponent)]`, or by hand for anything more exotic.

/// A value that can appear as a single URL path segment or query value.
///
/// # Round-trip law
///
/// For any value actually producible by [`parse`](UrlComponent::parse),
/// rendering and re-parsing must reproduce an equal value:
/// `parse(&render(v).unwrap()) == Some(v)`. The provided float
/// implementations satisfy this because Rust's `Display` emits the
/// shortest representation that round-trips exactly.
pub trait UrlComponent: Sized {
    /// Convert a raw URL component into a value. `None` means the string
    /// is not a valid representation of `Self`.
    fn parse(component: &str) -> Option<Self>;

    /// Render the value as a URL component. `None` suppresses emission:
    /// no path segment is appended, no query pair is written.
    fn render(&self) -> Option<String>;

    /// The value to bind when the input is absent altogether (a query key
    /// that does not appear in the URL). `None` means absence is an error
    /// unless the field declares a default. Only the [`Option`] combinator
    /// overrides this.
    fn missing() -> Option<Self> {
        None
    }
}

// One impl per primitive rather than a blanket impl over FromStr + Display:
// a blanket impl would overlap the Option combinator below.
macro_rules! impl_url_component {
    ($($ty:ty),* $(,)?) => {
        $(
            impl UrlComponent for $ty {
                fn parse(component: &str) -> Option<Self> {
                    component.parse().ok()
                }

                fn render(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_url_component!(
    String, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Absence maps to `None`, a present-but-invalid string is still a
/// conversion failure, and rendering `None` suppresses emission.
impl<T: UrlComponent> UrlComponent for Option<T> {
    fn parse(component: &str) -> Option<Self> {
        T::parse(component).map(Some)
    }

    fn render(&self) -> Option<String> {
        self.as_ref().and_then(T::render)
    }

    fn missing() -> Option<Self> {
        Some(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        let n = i64::parse("123").expect("parse i64");
        assert_eq!(n, 123);
        assert_eq!(n.render().as_deref(), Some("123"));

        let b = bool::parse("true").expect("parse bool");
        assert!(b);
        assert_eq!(b.render().as_deref(), Some("true"));

        let s = String::parse("fizz").expect("parse string");
        assert_eq!(s, "fizz");
        assert_eq!(s.render().as_deref(), Some("fizz"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(i32::parse("abc"), None);
        assert_eq!(u8::parse("-1"), None);
        assert_eq!(bool::parse("yes"), None);
        assert_eq!(f64::parse("12.5.1"), None);
    }

    #[test]
    fn test_float_render_round_trips_exactly() {
        let v = f64::parse("0.1").expect("parse f64");
        let rendered = v.render().expect("render f64");
        assert_eq!(f64::parse(&rendered), Some(v));
    }

    #[test]
    fn test_option_combinator() {
        // Present and valid wraps the value.
        assert_eq!(Option::<i32>::parse("7"), Some(Some(7)));
        // Present but invalid is a conversion failure, not None.
        assert_eq!(Option::<i32>::parse("abc"), None);
        // Absent input binds to None.
        assert_eq!(Option::<i32>::missing(), Some(None));
        // None suppresses emission, Some renders the wrapped value.
        assert_eq!(None::<i32>.render(), None);
        assert_eq!(Some(7).render().as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_string_is_a_valid_string_component() {
        assert_eq!(String::parse(""), Some(String::new()));
    }
}
