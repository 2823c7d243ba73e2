//! Contact form markup.
//!
//! Renders the static HTML the form is mounted on: one group per field
//! with its error region, a status region and the submit button. Invalid
//! fields are rendered with `aria-invalid` and point at their error region
//! through `aria-describedby`.

use ironhtml::html;
use ironhtml_elements::{Div, Span};

use crate::control::{Attrs, Control};
use crate::field::Field;
use crate::surface::StatusMessage;

/// Renders one field group.
pub fn render_field(field: &Field) -> String {
    let id = field.name.clone();
    let error_id = field.error_id();
    let constraints = &field.constraints;

    let mut attrs = Attrs::new()
        .with("id", id.as_str())
        .with("class", "form__input");

    if constraints.required {
        attrs.set("required", "required");
        attrs.set("aria-required", "true");
    }

    if let Some(min) = constraints.min_length {
        attrs.set("minlength", min.to_string());
    }

    let error_text = field.validity.reason().unwrap_or_default().to_string();
    if field.is_invalid() {
        attrs.set("aria-invalid", "true");
        attrs.set("aria-describedby", error_id.as_str());
    }

    let control_html =
        Control::for_kind(constraints.kind).render(&field.name, &field.value, &attrs);

    let required_marker = if constraints.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);
    let label_el = html! {
        label.for_(#id).class("form__label") { #label_text }
    };

    html! { div.class("form__group") }
        .raw(label_el.render())
        .raw(&control_html)
        .child::<Span, _>(|s| {
            s.class("form-error")
                .attr("id", &error_id)
                .attr("aria-live", "polite")
                .text(&error_text)
        })
        .render()
}

/// Renders the whole contact form.
pub fn render_contact_form(
    fields: &[Field],
    message: Option<&StatusMessage>,
    action: &str,
    method: &str,
) -> String {
    let mut form = html! {
        form.action(#action).method(#method)
    };
    form = form.attr("id", "contactForm").attr("novalidate", "novalidate");

    // Raw markup is only allowed inside flow content, not directly in <form>.
    for field in fields {
        let field_html = render_field(field);
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    let status_class = message.map_or("form-status", |m| m.kind.css_class());
    let status_text = message.map(|m| m.text.clone()).unwrap_or_default();
    form = form.child::<Div, _>(|d| {
        d.class(status_class)
            .attr("role", "status")
            .attr("aria-live", "polite")
            .text(&status_text)
    });

    let btn = html! { button.type_("submit").class("btn btn--primary") }
        .child::<Span, _>(|s| s.class("btn__text").text("Send Message"))
        .child::<Span, _>(|s| {
            s.class("btn__icon btn__icon--loading")
                .attr("aria-hidden", "true")
        });
    form = form.child::<Div, _>(|d| d.class("form__actions").raw(btn.render()));

    form.render()
}
