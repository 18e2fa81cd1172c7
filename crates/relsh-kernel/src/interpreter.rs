//! The command processor: one line in, one typed value out.
//!
//! A line is parsed into an expression tree, nested command groups are
//! evaluated inside-out with their values spliced into the enclosing
//! token stream, and the resulting head token decides whether the line
//! is a command invocation, a bare literal, or an assignment chain.
//!
//! Errors are user-visible and never fatal: a failed line is abandoned
//! as a whole (no partial assignments), the Last Result slot is set to
//! null, and the session continues.

use std::path::Path;
use std::sync::Arc;

use relsh_types::TypedValue;

use crate::commands::{CommandRegistry, ExecContext};
use crate::error::{ShellError, ShellResult};
use crate::parse::{self, Expr, Token};
use crate::presenter::Presenter;
use crate::resolve;
use crate::state::ShellState;

/// The interpreter: owns the session state and the command registry,
/// and reports through an injected presenter.
pub struct Interpreter {
    state: ShellState,
    registry: CommandRegistry,
    presenter: Arc<dyn Presenter>,
}

impl Interpreter {
    /// Create an interpreter for `user` with all built-ins registered.
    pub fn new(
        user: &str,
        data_dir: &Path,
        presenter: Arc<dyn Presenter>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: ShellState::new(user, data_dir)?,
            registry: CommandRegistry::with_builtins(),
            presenter,
        })
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Execute one input line.
    ///
    /// On failure the error is reported through the presenter, the Last
    /// Result becomes null, and the same error is returned so embedders
    /// can react without reporting it again.
    pub fn execute(&mut self, line: &str) -> ShellResult<TypedValue> {
        match self.eval_line(line) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.presenter.report_error(&err.to_string());
                self.state.fail();
                Err(err)
            }
        }
    }

    fn eval_line(&mut self, line: &str) -> ShellResult<TypedValue> {
        let exprs = parse::parse_line(line)?;
        if exprs.is_empty() {
            return Ok(TypedValue::Null);
        }

        // Split on the assignment arrow: value segment first, then one
        // target per arrow.
        let mut segments: Vec<Vec<Expr>> = vec![Vec::new()];
        for expr in exprs {
            if matches!(&expr, Expr::Atom(Token::Word(w)) if w == "->") {
                segments.push(Vec::new());
            } else {
                segments.last_mut().expect("at least one segment").push(expr);
            }
        }
        let targets = self.assignment_targets(&segments[1..])?;

        let value = self.eval_value(&segments[0], !targets.is_empty())?;
        for target in &targets {
            self.state.vars.set(target, value.clone())?;
        }
        if !targets.is_empty() {
            self.state.set_last_result(value.clone());
        }
        Ok(value)
    }

    /// Validate assignment targets before anything executes, so a bad
    /// target never leaves behind half of a line's effects.
    fn assignment_targets(&self, segments: &[Vec<Expr>]) -> ShellResult<Vec<String>> {
        let mut targets = Vec::with_capacity(segments.len());
        for segment in segments {
            let name = match segment.as_slice() {
                [Expr::Atom(Token::Word(name))] => name.clone(),
                _ => {
                    return Err(ShellError::Syntax(
                        "assignment target must be a single variable name".into(),
                    ))
                }
            };
            validate_target_name(&name)?;
            targets.push(name);
        }
        Ok(targets)
    }

    /// Evaluate the value segment of a line: a command invocation, or a
    /// single literal. Assignment context suppresses the announcement.
    fn eval_value(&mut self, exprs: &[Expr], assigning: bool) -> ShellResult<TypedValue> {
        // `calc` receives math parentheses verbatim; everywhere else a
        // non-command group is spliced without them.
        let keep_math_parens = matches!(
            exprs.first(),
            Some(Expr::Atom(Token::Word(w))) if w.eq_ignore_ascii_case("calc")
        );
        let tokens = self.eval_groups(exprs, keep_math_parens)?;

        match tokens.split_first() {
            // An empty value segment assigns the Last Result itself.
            None if assigning => {
                let value = self.state.last_result().clone();
                if value.is_null() {
                    return Err(ShellError::Resolution(
                        "no result available to reference".into(),
                    ));
                }
                Ok(value)
            }
            // A line whose groups spliced away entirely (a null group
            // assignment) has done its work; nothing remains to run.
            None => Ok(TypedValue::Null),
            Some((Token::Word(head), rest))
                if self.registry.contains(&head.to_lowercase()) =>
            {
                let name = head.to_lowercase();
                let args: Vec<String> = rest.iter().map(Token::render).collect();
                let (value, spec) = self.dispatch(&name, &args)?;
                if !assigning && !spec.quiet && !value.is_null() {
                    self.presenter.announce(&value.display());
                }
                Ok(value)
            }
            Some((only, [])) => {
                let raw = only.render();
                let value = if assigning {
                    resolve::resolve_assignable(&raw, &self.state)?
                } else {
                    match resolve::resolve_literal(&raw, &self.state) {
                        Some(resolved) => resolved?,
                        None => {
                            return Err(ShellError::Resolution(format!(
                                "unknown command: {raw}"
                            )))
                        }
                    }
                };
                self.state.set_last_result(value.clone());
                if !assigning && !value.is_null() {
                    self.presenter.announce(&value.display());
                }
                Ok(value)
            }
            Some((head, _)) if assigning => Err(ShellError::Syntax(format!(
                "assignment value must be a single value or a command, got extra token after {}",
                head.render()
            ))),
            Some((head, _)) => Err(ShellError::Resolution(format!(
                "unknown command: {}",
                head.render()
            ))),
        }
    }

    /// Evaluate nested groups inside-out, splicing each command group's
    /// value into the surrounding token stream.
    fn eval_groups(&mut self, exprs: &[Expr], keep_math_parens: bool) -> ShellResult<Vec<Token>> {
        let mut out = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match expr {
                Expr::Atom(token) => out.push(token.clone()),
                Expr::Group(children) => {
                    let inner = self.eval_groups(children, keep_math_parens)?;
                    let head = match inner.first() {
                        Some(Token::Word(w)) => w.to_lowercase(),
                        _ => String::new(),
                    };
                    if inner
                        .iter()
                        .any(|t| matches!(t, Token::Word(w) if w == "->"))
                    {
                        // A null assignment splices to nothing; the
                        // token simply disappears from the line.
                        let value = self.eval_group_assignment(&inner)?;
                        if !value.is_null() {
                            out.push(self.value_to_token(value));
                        }
                    } else if self.registry.contains(&head) {
                        let args: Vec<String> = inner[1..].iter().map(Token::render).collect();
                        let (value, spec) = self.dispatch(&head, &args)?;
                        if value.is_null() {
                            return Err(ShellError::Resolution(format!(
                                "{head} produced no value to splice"
                            )));
                        }
                        if !spec.quiet && !spec.category.suppress_nested_output() {
                            self.presenter.announce(&value.display());
                        }
                        out.push(self.value_to_token(value));
                    } else if keep_math_parens {
                        let rendered: Vec<String> =
                            inner.iter().map(Token::render).collect();
                        out.push(Token::Word(format!("({})", rendered.join(" "))));
                    } else {
                        out.extend(inner);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Assignment inside a parenthesized group: the value is assigned
    /// silently and spliced into the enclosing line.
    fn eval_group_assignment(&mut self, tokens: &[Token]) -> ShellResult<TypedValue> {
        let mut split = tokens.split(|t| matches!(t, Token::Word(w) if w == "->"));
        let value_tokens = split.next().unwrap_or(&[]);

        let mut targets = Vec::new();
        for segment in split {
            let name = match segment {
                [Token::Word(name)] => name.clone(),
                _ => {
                    return Err(ShellError::Syntax(
                        "assignment target must be a single variable name".into(),
                    ))
                }
            };
            validate_target_name(&name)?;
            targets.push(name);
        }

        let value = match value_tokens.split_first() {
            None => {
                let value = self.state.last_result().clone();
                if value.is_null() {
                    return Err(ShellError::Resolution(
                        "no result available to reference".into(),
                    ));
                }
                value
            }
            Some((Token::Word(head), rest))
                if self.registry.contains(&head.to_lowercase()) =>
            {
                let name = head.to_lowercase();
                let args: Vec<String> = rest.iter().map(Token::render).collect();
                self.dispatch(&name, &args)?.0
            }
            Some((only, [])) => resolve::resolve_assignable(&only.render(), &self.state)?,
            Some((head, _)) => {
                return Err(ShellError::Syntax(format!(
                    "assignment value must be a single value or a command, got extra token after {}",
                    head.render()
                )))
            }
        };

        for target in &targets {
            self.state.vars.set(target, value.clone())?;
        }
        self.state.set_last_result(value.clone());
        Ok(value)
    }

    fn dispatch(
        &mut self,
        name: &str,
        args: &[String],
    ) -> ShellResult<(TypedValue, crate::commands::CommandSpec)> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| ShellError::Resolution(format!("unknown command: {name}")))?
            .spec();
        let mut ctx = ExecContext {
            state: &mut self.state,
            registry: &self.registry,
            presenter: self.presenter.as_ref(),
        };
        let value = ctx.run_command(name, args)?;
        Ok((value, spec))
    }

    /// Turn a spliced value back into a token the enclosing line can
    /// consume. Paths are rendered relative to the user root so they
    /// re-resolve the way a typed path would.
    fn value_to_token(&self, value: TypedValue) -> Token {
        match value {
            TypedValue::Number(n) => Token::Word(TypedValue::format_number(n)),
            TypedValue::Str(s) => Token::Quoted(s),
            TypedValue::Directory(p) | TypedValue::File(p) => {
                let rendered = p
                    .strip_prefix(&self.state.user_root)
                    .map(|rel| format!("/{}", rel.display()))
                    .unwrap_or_else(|_| p.display().to_string());
                Token::Word(rendered)
            }
            TypedValue::Null => Token::Word(String::new()),
        }
    }
}

fn validate_target_name(name: &str) -> ShellResult<()> {
    if name.starts_with('$') || name.starts_with('#') {
        Ok(())
    } else {
        Err(ShellError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::RecordingPresenter;

    fn interp() -> (tempfile::TempDir, Arc<RecordingPresenter>, Interpreter) {
        let dir = tempfile::tempdir().unwrap();
        let presenter = Arc::new(RecordingPresenter::new());
        let interpreter =
            Interpreter::new("tester", dir.path(), presenter.clone()).unwrap();
        (dir, presenter, interpreter)
    }

    #[test]
    fn command_line_announces_its_value() {
        let (_dir, presenter, mut i) = interp();
        let value = i.execute("add 2 3").unwrap();
        assert_eq!(value, TypedValue::Number(5.0));
        assert_eq!(presenter.messages(), vec!["5.0"]);
    }

    #[test]
    fn nested_command_group_splices() {
        let (_dir, _presenter, mut i) = interp();
        let value = i.execute("add (multiply 2 3) 4").unwrap();
        assert_eq!(value, TypedValue::Number(10.0));
    }

    #[test]
    fn assignment_is_silent_and_chains() {
        let (_dir, presenter, mut i) = interp();
        i.execute("5 -> $a -> #b").unwrap();
        assert_eq!(
            i.state().vars.get("$a").unwrap().value,
            TypedValue::Number(5.0)
        );
        assert_eq!(
            i.state().vars.get("#b").unwrap().value,
            TypedValue::Number(5.0)
        );
        assert_eq!(i.state().last_result(), &TypedValue::Number(5.0));
        assert!(presenter.messages().is_empty());
    }

    #[test]
    fn bad_target_fails_before_anything_runs() {
        let (_dir, _presenter, mut i) = interp();
        let err = i.execute("add 2 3 -> plain").unwrap_err();
        assert!(matches!(err, ShellError::InvalidName(_)));
        // The value segment never executed, so the slot holds null.
        assert!(i.state().last_result().is_null());
    }

    #[test]
    fn failed_line_reports_and_nulls_the_slot() {
        let (_dir, presenter, mut i) = interp();
        i.execute("add 2 3").unwrap();
        let err = i.execute("divide 10 0").unwrap_err();
        assert!(matches!(err, ShellError::Arithmetic(_)));
        assert!(i.state().last_result().is_null());
        assert_eq!(presenter.errors(), vec!["division by zero"]);
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let (_dir, _presenter, mut i) = interp();
        i.execute("add 1 1").unwrap();
        i.execute("   ").unwrap();
        assert_eq!(i.state().last_result(), &TypedValue::Number(2.0));
    }

    #[test]
    fn unknown_head_is_reported() {
        let (_dir, _presenter, mut i) = interp();
        let err = i.execute("frobnicate 1 2").unwrap_err();
        assert!(matches!(err, ShellError::Resolution(_)));
    }

    #[test]
    fn group_assignment_assigns_and_splices() {
        let (_dir, _presenter, mut i) = interp();
        let value = i.execute("add (multiply 2 3 -> #product) 4").unwrap();
        assert_eq!(value, TypedValue::Number(10.0));
        assert_eq!(
            i.state().vars.get("#product").unwrap().value,
            TypedValue::Number(6.0)
        );
    }

    #[test]
    fn empty_value_segment_assigns_last_result() {
        let (_dir, _presenter, mut i) = interp();
        i.execute("add 2 3").unwrap();
        i.execute("-> $kept").unwrap();
        assert_eq!(
            i.state().vars.get("$kept").unwrap().value,
            TypedValue::Number(5.0)
        );

        i.state_mut().fail();
        let err = i.execute("-> $nope").unwrap_err();
        assert!(matches!(err, ShellError::Resolution(_)));
    }

    #[test]
    fn null_group_assignment_splices_to_nothing() {
        let (_dir, presenter, mut i) = interp();
        let value = i.execute("(null -> $a)").unwrap();
        assert!(value.is_null());
        assert!(i.state().vars.get("$a").unwrap().value.is_null());
        assert!(presenter.messages().is_empty());

        // The vanished token leaves the remaining operands behind.
        let value = i.execute("add (null -> #gone) 2 3").unwrap();
        assert_eq!(value, TypedValue::Number(5.0));
        assert!(i.state().vars.get("#gone").unwrap().value.is_null());
    }

    #[test]
    fn multi_token_assignment_value_is_a_syntax_error() {
        let (_dir, _presenter, mut i) = interp();
        let err = i.execute("5 6 -> $a").unwrap_err();
        assert!(matches!(err, ShellError::Syntax(_)));
        assert!(i.state().vars.get("$a").is_none());

        let err = i.execute("add (5 6 -> #b) 1").unwrap_err();
        assert!(matches!(err, ShellError::Syntax(_)));
        assert!(i.state().vars.get("#b").is_none());
    }

    #[test]
    fn calc_keeps_math_parens_from_the_line() {
        let (_dir, _presenter, mut i) = interp();
        let value = i.execute("calc (2 + 3) * 4").unwrap();
        assert_eq!(value, TypedValue::Number(20.0));
    }
}
