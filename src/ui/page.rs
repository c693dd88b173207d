//! List page with its create/update form and delete confirmation, shared by
//! the employee and project screens.

use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::controller::{CrudController, EntityForm, EntityKind, FieldKind};
use crate::models::{AssociationRef, Record};
use crate::ui::components::date_input::DateInputState;
use crate::ui::components::modal::{
    centered_rect, render_confirmation, render_notice, render_popup,
};
use crate::ui::components::picker::{toggled, PickerState};

type FieldOf<K> = <<K as EntityKind>::Form as EntityForm>::Field;

/// Per-entity presentation.
pub trait PageView: EntityKind + Sized {
    const TITLE: &'static str;
    /// Singular noun used in modal titles.
    const NOUN: &'static str;
    const DELETE_QUESTION: &'static str;
    const ASSOCIATION_TITLE: &'static str;
    const EMPTY_ASSOCIATION: &'static str;

    /// Lines describing one record in the list, name first.
    fn details(record: &Self::Record) -> Vec<Spans<'static>>;
    fn associations(record: &Self::Record) -> &[AssociationRef];

    fn field_label(field: <Self::Form as EntityForm>::Field) -> &'static str;
    fn field_error(field: <Self::Form as EntityForm>::Field) -> &'static str;

    /// Summary of the current association selection inside the form.
    fn selection_summary(form: &Self::Form, related: &[Self::Related]) -> Vec<Spans<'static>>;

    fn submit_label(_editing: bool) -> &'static str {
        "Salvar"
    }
}

/// What the shell should do with a key after the page saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput {
    /// The page did not use the key.
    Ignored,
    Handled,
    Submit,
    ConfirmDelete,
}

/// Cursor and editing state of one page, separate from the data it shows.
#[derive(Debug, Clone)]
pub struct PageState {
    pub list_state: ListState,
    pub field_index: usize,
    pub editing: bool,
    pub picker: PickerState,
    pub date_input: DateInputState,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            field_index: 0,
            editing: false,
            picker: PickerState::default(),
            date_input: DateInputState::new(None),
        }
    }

    fn reset_form(&mut self) {
        self.field_index = 0;
        self.editing = false;
        self.picker = PickerState::default();
    }

    /// Keep the list selection inside the current record count.
    pub fn clamp(&mut self, len: usize) {
        let selected = match (self.list_state.selected(), len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}

fn selected_id<K: PageView>(state: &PageState, controller: &CrudController<K>) -> Option<i64> {
    state
        .list_state
        .selected()
        .and_then(|i| controller.records().get(i))
        .map(Record::id)
}

pub fn handle_key<K: PageView>(
    state: &mut PageState,
    controller: &mut CrudController<K>,
    key: KeyCode,
) -> PageInput {
    if controller.is_loading() || controller.error().is_some() {
        return PageInput::Ignored;
    }

    if controller.is_validation_open() {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            controller.dismiss_validation();
        }
        return PageInput::Handled;
    }

    if controller.delete_target().is_some() {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => return PageInput::ConfirmDelete,
            KeyCode::Char('n') | KeyCode::Esc => controller.cancel_delete(),
            _ => {}
        }
        return PageInput::Handled;
    }

    if controller.is_form_open() {
        return handle_form_key(state, controller, key);
    }

    handle_list_key(state, controller, key)
}

fn handle_list_key<K: PageView>(
    state: &mut PageState,
    controller: &mut CrudController<K>,
    key: KeyCode,
) -> PageInput {
    let len = controller.records().len();
    match key {
        KeyCode::Down => state.next(len),
        KeyCode::Up => state.previous(len),
        KeyCode::Char('n') => {
            state.reset_form();
            controller.open_create();
        }
        KeyCode::Char('e') => {
            if let Some(id) = selected_id(state, controller) {
                state.reset_form();
                controller.open_edit(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = selected_id(state, controller) {
                controller.request_delete(id);
            }
        }
        _ => return PageInput::Ignored,
    }
    PageInput::Handled
}

fn handle_form_key<K: PageView>(
    state: &mut PageState,
    controller: &mut CrudController<K>,
    key: KeyCode,
) -> PageInput {
    let fields = <K::Form as EntityForm>::FIELDS;
    let field = fields[state.field_index];

    if state.editing {
        edit_field(state, controller, field, key);
        return PageInput::Handled;
    }

    match key {
        KeyCode::Up => {
            state.field_index = state.field_index.checked_sub(1).unwrap_or(fields.len() - 1);
        }
        KeyCode::Down | KeyCode::Tab => {
            state.field_index = (state.field_index + 1) % fields.len();
        }
        KeyCode::Enter => {
            state.editing = true;
            match <K::Form as EntityForm>::kind(field) {
                FieldKind::Date => {
                    state.date_input = DateInputState::new(controller.form().date());
                    state.date_input.toggle_editing();
                }
                FieldKind::Association => state.picker = PickerState::default(),
                FieldKind::Text => {}
            }
        }
        KeyCode::Char('s') => return PageInput::Submit,
        KeyCode::Esc => controller.close_form(),
        _ => {}
    }
    PageInput::Handled
}

fn edit_field<K: PageView>(
    state: &mut PageState,
    controller: &mut CrudController<K>,
    field: FieldOf<K>,
    key: KeyCode,
) {
    if matches!(key, KeyCode::Enter | KeyCode::Esc) {
        state.editing = false;
        state.date_input.editing = false;
        return;
    }

    match <K::Form as EntityForm>::kind(field) {
        FieldKind::Text => {
            let mut value = controller.form().text(field);
            match key {
                KeyCode::Char(c) => value.push(c),
                KeyCode::Backspace => {
                    value.pop();
                }
                _ => return,
            }
            controller.update_field(field, &value);
        }
        FieldKind::Date => {
            state.date_input.handle_input(key);
            controller.update_date(state.date_input.date());
        }
        FieldKind::Association => {
            let len = controller.related().len();
            match key {
                KeyCode::Down => state.picker.next(len),
                KeyCode::Up => state.picker.previous(len),
                KeyCode::Char(' ') => {
                    if let Some(related) = controller.related().get(state.picker.cursor) {
                        let selection = toggled(controller.form().selection(), related.id());
                        controller.set_selection(selection);
                    }
                }
                _ => {}
            }
        }
    }
}

pub fn render_page<K: PageView, B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    state: &mut PageState,
    controller: &CrudController<K>,
) {
    if controller.is_loading() {
        frame.render_widget(Paragraph::new("Carregando..."), area);
        return;
    }
    if let Some(error) = controller.error() {
        let message = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(message, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)].as_ref())
        .split(area);

    state.clamp(controller.records().len());
    let items: Vec<ListItem> = controller
        .records()
        .iter()
        .map(|record| ListItem::new(record_lines::<K>(record)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(K::TITLE).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, chunks[0], &mut state.list_state);

    let buttons_text = if state.list_state.selected().is_some() {
        format!(
            "<N> Adicionar {} | <E> Editar | <D> Excluir | <1> Funcionários | <2> Projetos | <Q> Sair",
            K::NOUN
        )
    } else {
        format!(
            "<N> Adicionar {} | <1> Funcionários | <2> Projetos | <Q> Sair",
            K::NOUN
        )
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);

    if controller.is_form_open() {
        render_form(frame, area, state, controller);
    }
    if controller.delete_target().is_some() {
        let question = K::DELETE_QUESTION;
        render_confirmation(frame, area, "Confirmar Exclusão", question);
    }
    if controller.is_validation_open() {
        render_notice(
            frame,
            area,
            "Validação do Formulário",
            "Por favor, preencha todos os campos obrigatórios.",
        );
    }
}

fn record_lines<K: PageView>(record: &K::Record) -> Vec<Spans<'static>> {
    let mut lines = K::details(record);
    lines.push(Spans::from(Span::styled(
        K::ASSOCIATION_TITLE,
        Style::default().fg(Color::Gray),
    )));

    let associations = K::associations(record);
    if associations.is_empty() {
        lines.push(Spans::from(format!("  {}", K::EMPTY_ASSOCIATION)));
    } else {
        lines.extend(
            associations
                .iter()
                .map(|a| Spans::from(format!("  • {}", a.nome))),
        );
    }
    lines.push(Spans::from(""));
    lines
}

fn render_form<K: PageView, B: Backend>(
    frame: &mut Frame<B>,
    size: Rect,
    state: &PageState,
    controller: &CrudController<K>,
) {
    let editing_record = controller.editing().is_some();
    let title = if editing_record {
        format!("Editar {}", K::NOUN)
    } else {
        format!("Adicionar {}", K::NOUN)
    };

    let form = controller.form();
    let mut lines = Vec::new();
    for (i, &field) in <K::Form as EntityForm>::FIELDS.iter().enumerate() {
        let selected = i == state.field_index;
        let editing = selected && state.editing;
        let label_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let label = Span::styled(format!("{}: ", K::field_label(field)), label_style);

        match <K::Form as EntityForm>::kind(field) {
            FieldKind::Text => {
                let value = format!("{}{}", form.text(field), if editing { "|" } else { "" });
                lines.push(Spans::from(vec![
                    label,
                    Span::styled(value, value_style(editing)),
                ]));
            }
            FieldKind::Date => {
                let value = if editing {
                    state.date_input.get_display_string()
                } else {
                    DateInputState::new(form.date()).get_display_string()
                };
                lines.push(Spans::from(vec![
                    label,
                    Span::styled(value, value_style(editing)),
                ]));
            }
            FieldKind::Association => {
                lines.push(Spans::from(label));
                for summary in K::selection_summary(form, controller.related()) {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(summary.0);
                    lines.push(Spans::from(spans));
                }
                if editing {
                    lines.extend(picker_lines::<K>(state, controller));
                }
            }
        }

        if controller.has_error(field) {
            lines.push(Spans::from(Span::styled(
                format!("  {}", K::field_error(field)),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Spans::from(""));
    let help = if state.editing {
        "<Enter> Concluir campo | <Espaço> Marcar/desmarcar | <Esc> Concluir".to_string()
    } else {
        format!(
            "<Enter> Editar campo | <↑/↓> Navegar | <S> {} | <Esc> Cancelar",
            K::submit_label(editing_record)
        )
    };
    lines.push(Spans::from(Span::styled(help, Style::default().fg(Color::Gray))));

    render_popup(frame, centered_rect(70, 80, size), &title, lines);
}

fn picker_lines<K: PageView>(
    state: &PageState,
    controller: &CrudController<K>,
) -> Vec<Spans<'static>> {
    let selection = controller.form().selection();
    controller
        .related()
        .iter()
        .enumerate()
        .map(|(i, related)| {
            let mark = if selection.contains(&related.id()) { "[x]" } else { "[ ]" };
            let style = if i == state.picker.cursor {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            Spans::from(Span::styled(
                format!("    {} {}", mark, related.nome()),
                style,
            ))
        })
        .collect()
}

fn value_style(editing: bool) -> Style {
    if editing {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// One mounted entity page: its controller plus its cursor state.
pub struct Page<K: PageView> {
    pub controller: CrudController<K>,
    pub state: PageState,
}

impl<K: PageView> Default for Page<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PageView> Page<K> {
    pub fn new() -> Self {
        Self {
            controller: CrudController::new(),
            state: PageState::new(),
        }
    }

    pub fn render<B: Backend>(&mut self, frame: &mut Frame<B>, area: Rect) {
        render_page(frame, area, &mut self.state, &self.controller);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> PageInput {
        handle_key(&mut self.state, &mut self.controller, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::RecordingBackend;
    use crate::controller::{Employees, Projects, SubmitOutcome};
    use serde_json::json;
    use tui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn backend() -> RecordingBackend {
        RecordingBackend::default()
            .with_collection(
                "/funcionarios",
                json!([{"id": 7, "nome": "Ana", "cpf": "12345678901", "email": "a@x", "salario": 10.0,
                        "projetos": [{"id": 2, "nome": "Portal"}]}]),
            )
            .with_collection(
                "/projetos",
                json!([{"id": 2, "nome": "Portal", "dataCriacao": "2024-05-01",
                        "funcionarios": [{"id": 7, "nome": "Ana"}]}]),
            )
    }

    fn draw<K: PageView>(page: &mut Page<K>) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| page.render(f, f.size())).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect())
            .collect()
    }

    #[tokio::test]
    async fn create_form_shows_inline_errors_in_red() {
        let api = backend();
        let mut page = Page::<Projects>::new();
        page.controller.mount(&api).await;

        assert_eq!(page.handle_key(KeyCode::Char('n')), PageInput::Handled);
        assert_eq!(page.controller.submit(&api).await, SubmitOutcome::Invalid);

        let buffer = draw(&mut page);
        let rows = rows(&buffer);
        assert!(rows.iter().any(|r| r.contains("Adicionar Projeto")));
        assert!(!rows.iter().any(|r| r.contains("Validação do Formulário")));

        let y = rows
            .iter()
            .position(|r| r.contains("Nome é obrigatório"))
            .unwrap();
        let start = rows[y].find("Nome é obrigatório").unwrap();
        let x = rows[y][..start].chars().count() as u16;
        assert_eq!(buffer.get(x, y as u16).fg, Color::Red);
        assert!(rows.iter().any(|r| r.contains("Data de Criação é obrigatória")));
        assert!(rows.iter().any(|r| r.contains("Funcionários são obrigatórios")));
    }

    #[tokio::test]
    async fn edit_form_title_and_validation_notice() {
        let api = backend();
        let mut page = Page::<Employees>::new();
        page.controller.mount(&api).await;

        page.handle_key(KeyCode::Down);
        page.handle_key(KeyCode::Char('e'));
        let edit = rows(&draw(&mut page));
        assert!(edit.iter().any(|r| r.contains("Editar Funcionário")));
        assert!(edit.iter().any(|r| r.contains("123.456.789-01")));
        assert!(!edit.iter().any(|r| r.contains("obrigatório")));

        page.controller.set_selection(vec![]);
        assert_eq!(page.controller.submit(&api).await, SubmitOutcome::Invalid);

        let notice = rows(&draw(&mut page));
        assert!(notice.iter().any(|r| r.contains("Validação do Formulário")));
        assert!(notice
            .iter()
            .any(|r| r.contains("Por favor, preencha todos os campos obrigatórios.")));

        assert_eq!(page.handle_key(KeyCode::Enter), PageInput::Handled);
        let dismissed = rows(&draw(&mut page));
        assert!(!dismissed.iter().any(|r| r.contains("Validação do Formulário")));
        assert!(dismissed.iter().any(|r| r.contains("Selecione ao menos um projeto")));
    }

    #[tokio::test]
    async fn delete_asks_for_confirmation() {
        let api = backend();
        let mut page = Page::<Projects>::new();
        page.controller.mount(&api).await;

        page.handle_key(KeyCode::Down);
        page.handle_key(KeyCode::Char('d'));
        let rows = rows(&draw(&mut page));

        assert!(rows.iter().any(|r| r.contains("Confirmar Exclusão")));
        assert!(rows.iter().any(|r| r.contains("<Y> Confirmar  <N> Cancelar")));
        assert_eq!(page.handle_key(KeyCode::Char('y')), PageInput::ConfirmDelete);
    }
}
