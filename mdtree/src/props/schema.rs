//! HTML and SVG attribute schemas.
//!
//! Maps attribute names to the canonical output property name plus the value kind the
//! property mapper should coerce to. Anything not listed here is resolved by the fallback rules
//! in [`find`].

/// Which attribute schema applies. Entering `<svg>` switches to [`Space::Svg`] for its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    #[default]
    Html,
    Svg,
}

/// How an attribute value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Boolean,
    /// Boolean when empty, string otherwise (`download`).
    OverloadedBoolean,
    Number,
    SpaceSeparated,
    CommaSeparated,
}

/// Result of a schema lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub property: String,
    pub kind: Kind,
}

type Entry = (&'static str, &'static str, Kind);

use Kind::*;

const HTML: &[Entry] = &[
    ("abbr", "abbr", Text),
    ("accept", "accept", CommaSeparated),
    ("accept-charset", "acceptCharset", SpaceSeparated),
    ("accesskey", "accessKey", SpaceSeparated),
    ("action", "action", Text),
    ("align", "align", Text),
    ("allow", "allow", Text),
    ("allowfullscreen", "allowFullScreen", Boolean),
    ("alt", "alt", Text),
    ("async", "async", Boolean),
    ("autocapitalize", "autoCapitalize", Text),
    ("autocomplete", "autoComplete", SpaceSeparated),
    ("autofocus", "autoFocus", Boolean),
    ("autoplay", "autoPlay", Boolean),
    ("bgcolor", "bgColor", Text),
    ("border", "border", Number),
    ("cellpadding", "cellPadding", Text),
    ("cellspacing", "cellSpacing", Text),
    ("charset", "charSet", Text),
    ("checked", "checked", Boolean),
    ("cite", "cite", Text),
    ("class", "className", SpaceSeparated),
    ("cols", "cols", Number),
    ("colspan", "colSpan", Number),
    ("content", "content", Text),
    ("contenteditable", "contentEditable", Text),
    ("controls", "controls", Boolean),
    ("coords", "coords", CommaSeparated),
    ("crossorigin", "crossOrigin", Text),
    ("datetime", "dateTime", Text),
    ("decoding", "decoding", Text),
    ("default", "default", Boolean),
    ("defer", "defer", Boolean),
    ("dir", "dir", Text),
    ("dirname", "dirName", Text),
    ("disabled", "disabled", Boolean),
    ("download", "download", OverloadedBoolean),
    ("draggable", "draggable", Text),
    ("enctype", "encType", Text),
    ("enterkeyhint", "enterKeyHint", Text),
    ("for", "htmlFor", SpaceSeparated),
    ("form", "form", Text),
    ("formaction", "formAction", Text),
    ("formenctype", "formEncType", Text),
    ("formmethod", "formMethod", Text),
    ("formnovalidate", "formNoValidate", Boolean),
    ("formtarget", "formTarget", Text),
    ("frameborder", "frameBorder", Text),
    ("headers", "headers", SpaceSeparated),
    ("height", "height", Number),
    ("hidden", "hidden", Boolean),
    ("high", "high", Number),
    ("href", "href", Text),
    ("hreflang", "hrefLang", Text),
    ("http-equiv", "httpEquiv", SpaceSeparated),
    ("id", "id", Text),
    ("inert", "inert", Boolean),
    ("inputmode", "inputMode", Text),
    ("integrity", "integrity", Text),
    ("ismap", "isMap", Boolean),
    ("itemid", "itemId", Text),
    ("itemprop", "itemProp", SpaceSeparated),
    ("itemref", "itemRef", SpaceSeparated),
    ("itemscope", "itemScope", Boolean),
    ("itemtype", "itemType", SpaceSeparated),
    ("kind", "kind", Text),
    ("label", "label", Text),
    ("lang", "lang", Text),
    ("list", "list", Text),
    ("loading", "loading", Text),
    ("loop", "loop", Boolean),
    ("low", "low", Number),
    ("max", "max", Text),
    ("maxlength", "maxLength", Number),
    ("media", "media", Text),
    ("method", "method", Text),
    ("min", "min", Text),
    ("minlength", "minLength", Number),
    ("multiple", "multiple", Boolean),
    ("muted", "muted", Boolean),
    ("name", "name", Text),
    ("nonce", "nonce", Text),
    ("nowrap", "noWrap", Boolean),
    ("novalidate", "noValidate", Boolean),
    ("open", "open", Boolean),
    ("optimum", "optimum", Number),
    ("pattern", "pattern", Text),
    ("ping", "ping", SpaceSeparated),
    ("placeholder", "placeholder", Text),
    ("playsinline", "playsInline", Boolean),
    ("poster", "poster", Text),
    ("preload", "preload", Text),
    ("readonly", "readOnly", Boolean),
    ("referrerpolicy", "referrerPolicy", Text),
    ("rel", "rel", SpaceSeparated),
    ("required", "required", Boolean),
    ("reversed", "reversed", Boolean),
    ("role", "role", Text),
    ("rows", "rows", Number),
    ("rowspan", "rowSpan", Number),
    ("sandbox", "sandbox", SpaceSeparated),
    ("scope", "scope", Text),
    ("selected", "selected", Boolean),
    ("shape", "shape", Text),
    ("size", "size", Number),
    ("sizes", "sizes", CommaSeparated),
    ("slot", "slot", Text),
    ("span", "span", Number),
    ("spellcheck", "spellCheck", Text),
    ("src", "src", Text),
    ("srcdoc", "srcDoc", Text),
    ("srclang", "srcLang", Text),
    ("srcset", "srcSet", CommaSeparated),
    ("start", "start", Number),
    ("step", "step", Text),
    ("style", "style", Text),
    ("tabindex", "tabIndex", Number),
    ("target", "target", Text),
    ("title", "title", Text),
    ("translate", "translate", Text),
    ("type", "type", Text),
    ("usemap", "useMap", Text),
    ("valign", "vAlign", Text),
    ("value", "value", Text),
    ("width", "width", Number),
    ("wrap", "wrap", Text),
];

const SVG: &[Entry] = &[
    ("class", "className", SpaceSeparated),
    ("clip-path", "clipPath", Text),
    ("clip-rule", "clipRule", Text),
    ("color", "color", Text),
    ("color-interpolation-filters", "colorInterpolationFilters", Text),
    ("cx", "cx", Text),
    ("cy", "cy", Text),
    ("d", "d", Text),
    ("display", "display", Text),
    ("dominant-baseline", "dominantBaseline", Text),
    ("dx", "dx", Text),
    ("dy", "dy", Text),
    ("fill", "fill", Text),
    ("fill-opacity", "fillOpacity", Text),
    ("fill-rule", "fillRule", Text),
    ("filter", "filter", Text),
    ("focusable", "focusable", Text),
    ("font-family", "fontFamily", Text),
    ("font-size", "fontSize", Text),
    ("font-style", "fontStyle", Text),
    ("font-weight", "fontWeight", Text),
    ("gradientTransform", "gradientTransform", Text),
    ("gradientUnits", "gradientUnits", Text),
    ("height", "height", Text),
    ("href", "href", Text),
    ("id", "id", Text),
    ("in", "in", Text),
    ("in2", "in2", Text),
    ("lang", "lang", Text),
    ("marker-end", "markerEnd", Text),
    ("marker-mid", "markerMid", Text),
    ("marker-start", "markerStart", Text),
    ("markerHeight", "markerHeight", Text),
    ("markerWidth", "markerWidth", Text),
    ("mask", "mask", Text),
    ("mode", "mode", Text),
    ("offset", "offset", Text),
    ("opacity", "opacity", Text),
    ("operator", "operator", Text),
    ("pathLength", "pathLength", Number),
    ("patternUnits", "patternUnits", Text),
    ("points", "points", CommaSeparated),
    ("preserveAspectRatio", "preserveAspectRatio", Text),
    ("r", "r", Text),
    ("refX", "refX", Text),
    ("refY", "refY", Text),
    ("result", "result", Text),
    ("role", "role", Text),
    ("rx", "rx", Text),
    ("ry", "ry", Text),
    ("shape-rendering", "shapeRendering", Text),
    ("stdDeviation", "stdDeviation", Text),
    ("stop-color", "stopColor", Text),
    ("stop-opacity", "stopOpacity", Text),
    ("stroke", "stroke", Text),
    ("stroke-dasharray", "strokeDasharray", Text),
    ("stroke-dashoffset", "strokeDashoffset", Text),
    ("stroke-linecap", "strokeLinecap", Text),
    ("stroke-linejoin", "strokeLinejoin", Text),
    ("stroke-miterlimit", "strokeMiterlimit", Text),
    ("stroke-opacity", "strokeOpacity", Text),
    ("stroke-width", "strokeWidth", Text),
    ("style", "style", Text),
    ("tabindex", "tabIndex", Number),
    ("text-anchor", "textAnchor", Text),
    ("text-rendering", "textRendering", Text),
    ("transform", "transform", Text),
    ("vector-effect", "vectorEffect", Text),
    ("viewBox", "viewBox", Text),
    ("visibility", "visibility", Text),
    ("width", "width", Text),
    ("x", "x", Text),
    ("x1", "x1", Text),
    ("x2", "x2", Text),
    ("xlink:href", "xlinkHref", Text),
    ("xlink:title", "xlinkTitle", Text),
    ("xml:lang", "xmlLang", Text),
    ("xml:space", "xmlSpace", Text),
    ("xmlns", "xmlns", Text),
    ("xmlns:xlink", "xmlnsXlink", Text),
    ("y", "y", Text),
    ("y1", "y1", Text),
    ("y2", "y2", Text),
];

/// SVG element names that are not all lowercase. Element trees store tags lowercased, the
/// output restores these inside an `svg` subtree.
const SVG_ELEMENTS: &[&str] = &[
    "altGlyph",
    "altGlyphDef",
    "altGlyphItem",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "clipPath",
    "feBlend",
    "feColorMatrix",
    "feComponentTransfer",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feDistantLight",
    "feDropShadow",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpecularLighting",
    "feSpotLight",
    "feTile",
    "feTurbulence",
    "foreignObject",
    "glyphRef",
    "linearGradient",
    "radialGradient",
    "textPath",
];

/// Canonical casing of an SVG element name, if it differs from the lowercase form.
pub fn svg_element_name(tag: &str) -> Option<&'static str> {
    SVG_ELEMENTS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(tag))
        .copied()
}

fn table(space: Space) -> &'static [Entry] {
    match space {
        Space::Html => HTML,
        Space::Svg => SVG,
    }
}

/// Resolve an attribute name to its output property.
///
/// HTML names match case-insensitively. SVG names match exactly first, then
/// case-insensitively, since SVG attributes are case-sensitive but hand-written markup often
/// is not. `data-*` and `aria-*` are kept verbatim; other unknown names are kept verbatim when
/// they are syntactically valid. Returns `None` for names that must be dropped, which includes
/// inline event handlers.
pub fn find(space: Space, name: &str) -> Option<Info> {
    if is_event_handler(name) {
        return None;
    }

    let entries = table(space);
    let entry = match space {
        Space::Html => entries
            .iter()
            .find(|(attribute, _, _)| attribute.eq_ignore_ascii_case(name)),
        Space::Svg => entries
            .iter()
            .find(|(attribute, _, _)| *attribute == name)
            .or_else(|| {
                entries
                    .iter()
                    .find(|(attribute, _, _)| attribute.eq_ignore_ascii_case(name))
            }),
    };
    if let Some((_, property, kind)) = entry {
        return Some(Info {
            property: property.to_string(),
            kind: *kind,
        });
    }

    if !is_valid_attribute_name(name) {
        return None;
    }
    Some(Info {
        property: name.to_string(),
        kind: Kind::Text,
    })
}

/// Reverse lookup: the markup attribute for an output property name.
pub fn attribute_name(space: Space, property: &str) -> String {
    table(space)
        .iter()
        .find(|(_, known, _)| *known == property)
        .map(|(attribute, _, _)| attribute.to_string())
        .unwrap_or_else(|| property.to_string())
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

/// `[A-Za-z_:][A-Za-z0-9_:.-]*`
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}
