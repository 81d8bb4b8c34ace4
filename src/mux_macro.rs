/// Builds a [`Mux`](crate::Mux) from a list of routes.
///
/// ```ignore
/// let mux = mux! {
///     GET "/users/{id}" => show_user,
///     POST "/users" => create_user,
///     @ "/api/v1" => api_router;
///     _ => not_found
/// };
/// ```
///
/// `@ prefix => builder` includes a [`RouterBuilder`](crate::RouterBuilder)
/// under `prefix`. The optional `_ => handler` arm sets the not-found handler.
#[macro_export]
macro_rules! mux {
    {$($method:tt $pattern:expr => $data:expr),+ ; _ => $default:expr} => {{
        let mut __mux = $crate::Mux::new();
        $($crate::mux!(@entry __mux, $method, $pattern, $data);)+
        __mux.not_found($default);
        __mux
    }};

    {$($method:tt $pattern:expr => $data:expr),+ $(,)?} => {{
        let mut __mux = $crate::Mux::new();
        $($crate::mux!(@entry __mux, $method, $pattern, $data);)+
        __mux
    }};

    {@entry $mux:expr, @, $prefix:expr, $sub_router:expr} => {{
        let mut __b = $crate::RouterBuilder::with_prefix($prefix);
        __b.include($sub_router);
        $mux.include(__b);
    }};
    {@entry $mux:expr, $method:ident, $pattern:expr, $data:expr} => {
        $mux.route($crate::Method::$method, $pattern, $data);
    };
}
