/// HTTP Method.
///
/// The closed set of methods accepted in a request line: the methods from [RFC9110] without
/// `HEAD` and `CONNECT`, plus `PATCH` from [RFC5789].
///
/// Arbitrary method is not supported, matching is exact and case-sensitive.
///
/// [RFC5789]: https://www.rfc-editor.org/rfc/rfc5789
/// [RFC9110]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-methods>
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Method(u8);

struct Props {
    safe: bool,
    idem: bool,
    value: &'static [u8],
}

props! {
    static PROPS: [7];

    /// The [GET] method requests transfer of a current [selected representation][sr] for the
    /// [target resource][tr].
    ///
    /// [GET]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-get>
    /// [sr]: <https://www.rfc-editor.org/rfc/rfc9110.html#selected.representation>
    /// [tr]: <https://www.rfc-editor.org/rfc/rfc9110.html#target.resource>
    pub const GET = (0, b"GET", safe, idempotent);
    /// The [POST] method requests that the [target resource][tr] process the representation
    /// enclosed in the request according to the resource's own specific semantics.
    ///
    /// [POST]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-post>
    /// [tr]: <https://www.rfc-editor.org/rfc/rfc9110.html#target.resource>
    pub const POST = (1, b"POST", , );
    /// The [PUT] method requests that the state of the [target resource][tr] be created or
    /// replaced with the state defined by the representation enclosed in the request message
    /// content.
    ///
    /// [PUT]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-put>
    /// [tr]: <https://www.rfc-editor.org/rfc/rfc9110.html#target.resource>
    pub const PUT = (2, b"PUT", , idempotent);
    /// The [PATCH] method requests that a set of changes described in the request entity be
    /// applied to the resource identified by the Request-URI.
    ///
    /// [PATCH]: <https://www.rfc-editor.org/rfc/rfc5789#section-2>
    pub const PATCH = (3, b"PATCH", , );
    /// The [DELETE] method requests that the origin server remove the association between the
    /// [target resource][tr] and its current functionality.
    ///
    /// [DELETE]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-delete>
    /// [tr]: <https://www.rfc-editor.org/rfc/rfc9110.html#target.resource>
    pub const DELETE = (4, b"DELETE", , idempotent);
    /// The [OPTIONS] method requests information about the communication options available for the
    /// target resource, at either the origin server or an intervening intermediary.
    ///
    /// [OPTIONS]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-options>
    pub const OPTIONS = (5, b"OPTIONS", safe, idempotent);
    /// The [TRACE] method requests a remote, application-level loop-back of the request message.
    ///
    /// [TRACE]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-trace>
    pub const TRACE = (6, b"TRACE", safe, idempotent);
}

impl Method {
    /// Every accepted method, in declaration order.
    pub const ALL: [Method; 7] = [
        Self::GET,
        Self::POST,
        Self::PUT,
        Self::PATCH,
        Self::DELETE,
        Self::OPTIONS,
        Self::TRACE,
    ];

    /// Returns `true` if method is considered ["safe"].
    ///
    /// Request methods are considered "safe" if their defined semantics are essentially read-only.
    /// Of the accepted methods, GET, OPTIONS, and TRACE are safe.
    ///
    /// ["safe"]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-safe-methods>
    #[inline]
    pub const fn is_safe(&self) -> bool {
        PROPS[self.0 as usize].safe
    }

    /// Returns `true` if method is considered ["idempotent"].
    ///
    /// PUT, DELETE, and safe request methods are idempotent.
    ///
    /// ["idempotent"]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-idempotent-methods>
    #[inline]
    pub const fn is_idempotent(&self) -> bool {
        PROPS[self.0 as usize].idem
    }

    /// Returns string representation of the method.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        // SAFETY: every `PROPS` value is an ASCII literal
        unsafe { std::str::from_utf8_unchecked(PROPS[self.0 as usize].value) }
    }
}

impl std::str::FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or(UnknownMethod)
    }
}

impl std::fmt::Debug for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_str(), f)
    }
}

impl std::fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Error =====

/// Error returned when a string is not one of the accepted methods.
pub struct UnknownMethod;

impl std::error::Error for UnknownMethod { }

impl std::fmt::Debug for UnknownMethod {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown method")
    }
}

impl std::fmt::Display for UnknownMethod {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown method")
    }
}

// ===== Macros =====

macro_rules! props {
    (
        static $props:ident: [$len:literal];
        $(
           $(#[$doc:meta])*
           pub const $name:ident = ($idx:literal, $val:literal, $($safe:ident)?, $($idem:ident)?);
        )*
    ) => {
        impl Method {
            $(
               $(#[$doc])*
               pub const $name: Self = Self($idx);
            )*

            /// Create [`Method`] from bytes.
            ///
            /// Returns `None` if `src` is not exactly one of the accepted methods.
            #[inline]
            pub const fn from_bytes(src: &[u8]) -> Option<Method> {
                match src {
                    $(
                        $val => Some(Self::$name),
                    )*
                    _ => None,
                }
            }
        }

        static $props: [Props; $len] = [
            $(
                Props { value: $val, safe: prop!($($safe)?), idem: prop!($($idem)?) },
            )*
        ];
    };
}

macro_rules! prop {
    (safe) => { true };
    (idempotent) => { true };
    () => { false };
}

use {props, prop};
