//! Contact form submission feedback
//!
//! There is no backend: a submission shows a sending state on the button,
//! then resets the form and shows a transient success message.

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, TimerQueue};
use vitrine_platform::{Document, ElementId, HostEvent};

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormConfig {
    pub form_selector: String,
    pub submit_selector: String,
    pub sending_label: String,
    pub success_text: String,
    /// Simulated round trip
    pub send_ms: Millis,
    /// How long the success message stays before sliding out
    pub message_ms: Millis,
    /// Slide-out duration before removal
    pub slide_out_ms: Millis,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            form_selector: ".contact-form".to_string(),
            submit_selector: "button[type=\"submit\"]".to_string(),
            sending_label: "Sending...".to_string(),
            success_text: "Thank you! Your message has been sent successfully.".to_string(),
            send_ms: 2000,
            message_ms: 3000,
            slide_out_ms: 500,
        }
    }
}

const MESSAGE_STYLE: [(&str, &str); 9] = [
    ("position", "fixed"),
    ("top", "50%"),
    ("left", "50%"),
    ("transform", "translate(-50%, -50%)"),
    ("z-index", "10000"),
    ("padding", "2rem"),
    ("text-align", "center"),
    ("color", "var(--text-primary)"),
    ("animation", "slideInDown 0.5s ease-out"),
];

#[derive(Clone, Debug, PartialEq)]
enum FormStep {
    Sent { label: String },
    SlideOut(ElementId),
    Dismiss(ElementId),
}

pub struct ContactForm {
    config: ContactFormConfig,
    form: ElementId,
    submit: Option<ElementId>,
    sending: bool,
    timers: TimerQueue<FormStep>,
}

impl ContactForm {
    pub fn mount(doc: &dyn Document, config: ContactFormConfig) -> Option<Self> {
        let Some(form) = doc.query(&config.form_selector) else {
            tracing::debug!("contact form: no `{}` element, inert", config.form_selector);
            return None;
        };
        let submit = doc.query_within(form, &config.submit_selector).into_iter().next();
        Some(Self {
            config,
            form,
            submit,
            sending: false,
            timers: TimerQueue::new(),
        })
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn submit(&mut self, doc: &mut dyn Document) {
        if self.sending {
            tracing::debug!("contact form: submission already in flight");
            return;
        }
        self.sending = true;
        tracing::info!("contact form: submitting");

        let label = match self.submit {
            Some(button) => {
                let label = doc.text(button);
                doc.set_text(button, &self.config.sending_label);
                doc.set_attribute(button, "disabled", "");
                label
            }
            None => String::new(),
        };
        self.timers
            .schedule(self.config.send_ms, FormStep::Sent { label });
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while let Some(step) = self.timers.pop_due(now) {
            match step {
                FormStep::Sent { label } => {
                    let message = self.show_success(doc);
                    doc.reset_form(self.form);
                    if let Some(button) = self.submit {
                        doc.set_text(button, &label);
                        doc.remove_attribute(button, "disabled");
                    }
                    self.sending = false;
                    self.timers
                        .schedule(self.config.message_ms, FormStep::SlideOut(message));
                }
                FormStep::SlideOut(message) => {
                    doc.set_style(message, "animation", "slideOutUp 0.5s ease-out");
                    self.timers
                        .schedule(self.config.slide_out_ms, FormStep::Dismiss(message));
                }
                FormStep::Dismiss(message) => doc.remove(message),
            }
        }
    }

    fn show_success(&self, doc: &mut dyn Document) -> ElementId {
        let message = doc.create_element("div");
        doc.set_class_name(message, "success-message glass-panel");
        let icon = doc.create_element("i");
        doc.set_class_name(icon, "fas fa-check-circle");
        doc.append_child(message, icon);
        let text = doc.create_element("p");
        doc.set_text(text, &self.config.success_text);
        doc.append_child(message, text);
        for (property, value) in MESSAGE_STYLE {
            doc.set_style(message, property, value);
        }
        let body = doc.body();
        doc.append_child(body, message);
        message
    }
}

impl Widget for ContactForm {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        if *event == HostEvent::Submit(self.form) {
            self.submit(cx.doc);
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        ContactForm::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::MemoryDocument;

    fn page() -> (MemoryDocument, ElementId, ElementId, ElementId) {
        let mut doc = MemoryDocument::new();
        let form = doc.element("form").class("contact-form").build();
        let input = doc
            .element("input")
            .attr("name", "email")
            .attr("value", "a@b.c")
            .child_of(form)
            .build();
        let button = doc
            .element("button")
            .attr("type", "submit")
            .text("Send Message")
            .child_of(form)
            .build();
        (doc, form, input, button)
    }

    #[test]
    fn test_submission_lifecycle() {
        let (mut doc, _, input, button) = page();
        let mut form = ContactForm::mount(&doc, ContactFormConfig::default()).unwrap();

        form.submit(&mut doc);
        assert_eq!(doc.text(button), "Sending...");
        assert!(doc.attribute(button, "disabled").is_some());

        form.advance(&mut doc, 1999);
        assert!(doc.query(".success-message").is_none());

        form.advance(&mut doc, 2000);
        let message = doc.query(".success-message").unwrap();
        assert!(doc.has_class(message, "glass-panel"));
        assert!(doc.text(message).contains("Thank you"));
        assert_eq!(doc.text(button), "Send Message");
        assert!(doc.attribute(button, "disabled").is_none());
        assert!(doc.attribute(input, "value").is_none());
        assert!(!form.is_sending());

        form.advance(&mut doc, 5000);
        assert_eq!(
            doc.style(message, "animation").as_deref(),
            Some("slideOutUp 0.5s ease-out")
        );
        form.advance(&mut doc, 5499);
        assert!(doc.contains(message));
        form.advance(&mut doc, 5500);
        assert!(!doc.contains(message));
    }

    #[test]
    fn test_double_submit_keeps_original_label() {
        let (mut doc, form_el, _, button) = page();
        let mut form = ContactForm::mount(&doc, ContactFormConfig::default()).unwrap();
        let mut store = vitrine_platform::MemoryStore::new();

        let mut cx = WidgetContext::new(&mut doc, &mut store);
        form.handle_event(&mut cx, &HostEvent::Submit(form_el));
        form.handle_event(&mut cx, &HostEvent::Submit(form_el));
        drop(cx);

        form.advance(&mut doc, 10_000);
        assert_eq!(doc.text(button), "Send Message");
        assert_eq!(doc.query_all(".success-message").len(), 0);
    }
}
