//! Names of the components published in the registry.

/// Installable components, sorted alphabetically.
const COMPONENTS: &[&str] = &[
    "accordion",
    "alert",
    "alert-dialog",
    "avatar",
    "badge",
    "breadcrumb",
    "button",
    "calendar",
    "card",
    "carousel",
    "checkbox",
    "collapsible",
    "combobox",
    "command",
    "context-menu",
    "dialog",
    "drawer",
    "dropdown-menu",
    "hover-card",
    "input",
    "input-otp",
    "label",
    "marquee",
    "menubar",
    "navigation-menu",
    "pagination",
    "popover",
    "progress",
    "radio-group",
    "resizable",
    "scroll-area",
    "select",
    "sheet",
    "sidebar",
    "skeleton",
    "slider",
    "sonner",
    "switch",
    "table",
    "tabs",
    "textarea",
    "tooltip",
];

/// Return the installable component names.
pub fn available_components() -> &'static [&'static str] {
    COMPONENTS
}
