//! Stylesheet injected at mount
//!
//! Covers the classes and keyframes that widgets toggle but the page
//! stylesheet does not ship: reveal states, the loader, the success
//! message slide and the feature card ripple.

use vitrine_platform::{Document, ElementId};

pub const PAGE_CSS: &str = r#"
.animate-on-scroll {
    opacity: 0;
    transform: translateY(30px);
    transition: all 0.6s ease;
}

.animate-in {
    opacity: 1;
    transform: translateY(0);
}

.loader-content {
    text-align: center;
}

.loader-logo {
    font-family: var(--font-secondary);
    font-size: 3rem;
    font-weight: 700;
    color: #4f000b;
    margin-bottom: 2rem;
    display: flex;
    justify-content: center;
    align-items: center;
}

.loader-spinner {
    width: 50px;
    height: 50px;
    border: 3px solid rgba(120, 0, 0, 0.3);
    border-top: 3px solid #4f000b;
    border-radius: 50%;
    animation: spin 1s linear infinite;
    margin: 0 auto 1rem;
}

.loader-text {
    color: #b8b8b8;
    font-size: 1rem;
}

@keyframes spin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}

@keyframes slideInDown {
    from { opacity: 0; transform: translate(-50%, -60%); }
    to { opacity: 1; transform: translate(-50%, -50%); }
}

@keyframes slideOutUp {
    from { opacity: 1; transform: translate(-50%, -50%); }
    to { opacity: 0; transform: translate(-50%, -60%); }
}

.success-message i {
    color: #6bcf7f;
    font-size: 2rem;
    margin-bottom: 1rem;
    display: block;
}

@keyframes rippleExpand {
    0% { transform: translate(-50%, -50%) scale(0); opacity: 1; }
    100% { transform: translate(-50%, -50%) scale(40); opacity: 0; }
}
"#;

/// Append a `<style>` element with [`PAGE_CSS`] to `<head>`, or to the
/// document element when there is no head
pub fn inject(doc: &mut dyn Document) -> ElementId {
    let style = doc.create_element("style");
    doc.set_text(style, PAGE_CSS);
    let parent = doc.query("head").unwrap_or_else(|| doc.root());
    doc.append_child(parent, style);
    style
}
