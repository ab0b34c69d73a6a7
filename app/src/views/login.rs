use super::{Context, Outcome};
use crate::error::ErrorKind;
use crate::form::{Field, Form, Type};
use crate::screen::{Element, Screen};
use controller::Controller;

pub const EMAIL: &str = "Email:";
pub const PASSWORD: &str = "Password:";
pub const SUBMIT: &str = "Log In";

#[derive(Debug, Clone)]
pub struct Login {
    form: Form,
}

impl Default for Login {
    fn default() -> Self {
        Self::new()
    }
}

impl Login {
    pub const HEADING: &'static str = "Log In";

    pub fn new() -> Self {
        let fields = vec![
            Field::Required(EMAIL, Type::Text),
            Field::Required(PASSWORD, Type::Secret),
        ];

        Self {
            form: Form::new(fields, SUBMIT),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn render(&self, screen: &mut Screen) {
        screen.push(Element::Heading(Self::HEADING.into()));
        self.form.render(screen);
    }

    pub async fn submit<C: Controller>(&mut self, ctx: &Context<'_, C>) -> Outcome {
        if let Some(label) = self.form.missing() {
            self.form.set_error(ErrorKind::MissingField(label.into()));
            return Outcome::Stay;
        }

        let email = self.text(EMAIL);
        let password = self.text(PASSWORD);

        match ctx.controller.login(email.trim(), &password).await {
            Ok(session) => {
                self.form.clear_error();
                Outcome::Authenticated(session)
            }

            Err(e) => {
                self.form.clear(PASSWORD);
                self.form.set_error(e);
                Outcome::Stay
            }
        }
    }

    fn text(&self, label: &str) -> String {
        self.form
            .get(label)
            .and_then(|value| value.as_text().ok())
            .map(String::from)
            .unwrap_or_default()
    }
}
