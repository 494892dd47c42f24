//! Login form demo.

use std::io::{self, BufRead};

use formcheck_lib::{Field, bind};
use log::{debug, info};

use crate::control::{Terminal, TerminalControl};

/// Email and password fields of the login form.
pub struct LoginForm {
    pub email: Field,
    pub password: Field,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: Field::builder().name("email").required().email().build(),
            password: Field::builder()
                .name("password")
                .required_with("Password cannot be empty")
                .build(),
        }
    }

    /// Check if every field passes.
    pub fn is_valid(&self) -> bool {
        self.email.is_valid() && self.password.is_valid()
    }

    /// Re-validate every field and report whether the form can be sent.
    pub fn submit(&self) -> bool {
        self.email.validate();
        self.password.validate();
        self.is_valid()
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one line, without its line ending. `None` at end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prompt for the form until it is submitted valid or input runs out.
///
/// Returns `true` when a valid submission went through.
pub fn run(mut input: impl BufRead, terminal: &Terminal) -> io::Result<bool> {
    let form = LoginForm::new();

    terminal.line("Login")?;
    let email = bind(&form.email, TerminalControl::new("Email", terminal.clone()));
    let password = bind(
        &form.password,
        TerminalControl::new("Password", terminal.clone()),
    );

    loop {
        terminal.prompt("Email")?;
        let Some(line) = read_line(&mut input)? else {
            debug!("[form] Input closed before submit");
            return Ok(false);
        };
        email.input(line);

        terminal.prompt("Password")?;
        let Some(line) = read_line(&mut input)? else {
            debug!("[form] Input closed before submit");
            return Ok(false);
        };
        password.input(line);

        if form.submit() {
            info!("[form] Submitted login for {}", form.email.value());
            terminal.line(&format!("Signed in as {}", form.email.value()))?;
            return Ok(true);
        }

        debug!("[form] Submit rejected");
        terminal.line("Please fix the errors above.")?;
    }
}
