use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use printq_core::{FormView, Msg};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Msg(Msg),
    Quit,
}

/// Maps a key press to an input for the update loop. Text edits are turned
/// into the full new value of the focused field.
pub fn map_key(key: KeyEvent, form: &FormView) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let field = form.focus;
    let current = form.value(field);
    let changed = |value: String| Some(Input::Msg(Msg::FieldChanged { field, value }));

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Input::Quit),
            KeyCode::Char('t') => Some(Input::Msg(Msg::CycleStatus)),
            KeyCode::Char('u') => changed(String::new()),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Input::Msg(Msg::FormSubmitted)),
        KeyCode::Tab | KeyCode::Down => Some(Input::Msg(Msg::FocusNext)),
        KeyCode::BackTab | KeyCode::Up => Some(Input::Msg(Msg::FocusPrev)),
        KeyCode::Esc => Some(Input::Msg(Msg::DismissError)),
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            changed(value)
        }
        KeyCode::Char(ch) => {
            let mut value = current.to_string();
            value.push(ch);
            changed(value)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printq_core::FormField;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn form_with_name(name: &str) -> FormView {
        let mut form = FormView {
            focus: FormField::Name,
            ..FormView::default()
        };
        form.draft.name = name.to_string();
        form
    }

    #[test]
    fn typing_appends_to_focused_field() {
        let form = form_with_name("pos");
        assert_eq!(
            map_key(press(KeyCode::Char('t')), &form),
            Some(Input::Msg(Msg::FieldChanged {
                field: FormField::Name,
                value: "post".to_string(),
            }))
        );
    }

    #[test]
    fn shifted_characters_are_text() {
        let form = form_with_name("");
        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            map_key(key, &form),
            Some(Input::Msg(Msg::FieldChanged {
                field: FormField::Name,
                value: "A".to_string(),
            }))
        );
    }

    #[test]
    fn backspace_on_empty_field_does_nothing() {
        assert_eq!(map_key(press(KeyCode::Backspace), &form_with_name("")), None);
        assert_eq!(
            map_key(press(KeyCode::Backspace), &form_with_name("ab")),
            Some(Input::Msg(Msg::FieldChanged {
                field: FormField::Name,
                value: "a".to_string(),
            }))
        );
    }

    #[test]
    fn control_keys_map_to_commands() {
        let form = form_with_name("x");
        assert_eq!(map_key(ctrl('q'), &form), Some(Input::Quit));
        assert_eq!(map_key(ctrl('c'), &form), Some(Input::Quit));
        assert_eq!(
            map_key(ctrl('t'), &form),
            Some(Input::Msg(Msg::CycleStatus))
        );
        assert_eq!(
            map_key(ctrl('u'), &form),
            Some(Input::Msg(Msg::FieldChanged {
                field: FormField::Name,
                value: String::new(),
            }))
        );
        assert_eq!(map_key(ctrl('x'), &form), None);
    }

    #[test]
    fn navigation_and_submit() {
        let form = form_with_name("");
        assert_eq!(
            map_key(press(KeyCode::Enter), &form),
            Some(Input::Msg(Msg::FormSubmitted))
        );
        assert_eq!(
            map_key(press(KeyCode::Tab), &form),
            Some(Input::Msg(Msg::FocusNext))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), &form),
            Some(Input::Msg(Msg::FocusPrev))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc), &form),
            Some(Input::Msg(Msg::DismissError))
        );
    }
}
