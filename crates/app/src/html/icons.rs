pub const BOAT_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 30">
  <path d="M15 2 L23 24 Q15 28 7 24 Z" fill="#38bdf8" stroke="#0a1628" stroke-width="1.5"/>
  <line x1="15" y1="6" x2="15" y2="22" stroke="#f8fafc" stroke-width="1.5"/>
</svg>
"##;

pub const ARROW_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 30">
  <line x1="15" y1="27" x2="15" y2="7" stroke="#facc15" stroke-width="3" stroke-linecap="round"/>
  <path d="M15 2 L21 11 L9 11 Z" fill="#facc15"/>
</svg>
"##;

pub const WAYPOINT_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20">
  <circle cx="10" cy="10" r="7" fill="#4ade80" fill-opacity="0.8" stroke="#050b16" stroke-width="2"/>
</svg>
"##;

/// Resolve an `/assets/{name}` request.
pub fn lookup(name: &str) -> Option<&'static str> {
    match name {
        "boat.svg" => Some(BOAT_SVG),
        "arrow.svg" => Some(ARROW_SVG),
        "waypoint.svg" => Some(WAYPOINT_SVG),
        _ => None,
    }
}
