use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::Backend as ApiBackend;
use crate::controller::{Employees, Projects, SubmitOutcome};
use crate::route::{EMPLOYEES_PATH, PROJECTS_PATH, Route};
use crate::ui::page::{Page, PageInput};

const NAV_ITEMS: [(&str, &str); 2] = [
    ("FUNCIONÁRIOS", EMPLOYEES_PATH),
    ("PROJETOS", PROJECTS_PATH),
];

const HOME_TITLE: &str = "Orla - frontend";
const HOME_DESCRIPTION: &str = "Gestão de projetos e funcionários, com operações de criação, \
leitura, atualização e exclusão de dados, além de permitir associar funcionários a projetos \
e vice-versa.";

/// Commands the shell reacts to when the page leaves a key unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Quit,
    Navigate(&'static str),
}

pub fn shell_command(key: KeyCode) -> Option<ShellCommand> {
    match key {
        KeyCode::Char('q') => Some(ShellCommand::Quit),
        KeyCode::Char('h') => Some(ShellCommand::Navigate(Route::Home.path())),
        KeyCode::Char('1') => Some(ShellCommand::Navigate(Route::Employees.path())),
        KeyCode::Char('2') => Some(ShellCommand::Navigate(Route::Projects.path())),
        _ => None,
    }
}

/// Page mounted for the current path.
pub enum ActivePage {
    Home,
    Employees(Page<Employees>),
    Projects(Page<Projects>),
    NotFound,
}

impl ActivePage {
    pub fn for_route(route: Option<Route>) -> Self {
        match route {
            Some(Route::Home) => ActivePage::Home,
            Some(Route::Employees) => ActivePage::Employees(Page::new()),
            Some(Route::Projects) => ActivePage::Projects(Page::new()),
            None => ActivePage::NotFound,
        }
    }

    pub fn route(&self) -> Option<Route> {
        match self {
            ActivePage::Home => Some(Route::Home),
            ActivePage::Employees(_) => Some(Route::Employees),
            ActivePage::Projects(_) => Some(Route::Projects),
            ActivePage::NotFound => None,
        }
    }

    /// True until the page's first fetch has completed.
    pub fn needs_mount(&self) -> bool {
        match self {
            ActivePage::Employees(page) => page.controller.is_loading(),
            ActivePage::Projects(page) => page.controller.is_loading(),
            ActivePage::Home | ActivePage::NotFound => false,
        }
    }

    pub async fn mount<A: ApiBackend>(&mut self, api: &A) {
        match self {
            ActivePage::Employees(page) => page.controller.mount(api).await,
            ActivePage::Projects(page) => page.controller.mount(api).await,
            ActivePage::Home | ActivePage::NotFound => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> PageInput {
        match self {
            ActivePage::Employees(page) => page.handle_key(key),
            ActivePage::Projects(page) => page.handle_key(key),
            ActivePage::Home | ActivePage::NotFound => PageInput::Ignored,
        }
    }

    /// Submit the open form; returns the path to move to after a save.
    pub async fn submit<A: ApiBackend>(&mut self, api: &A) -> Option<&'static str> {
        let outcome = match self {
            ActivePage::Employees(page) => page.controller.submit(api).await,
            ActivePage::Projects(page) => page.controller.submit(api).await,
            ActivePage::Home | ActivePage::NotFound => return None,
        };
        match outcome {
            SubmitOutcome::Saved { navigate_to } => Some(navigate_to),
            SubmitOutcome::Invalid | SubmitOutcome::Failed => None,
        }
    }

    pub async fn confirm_delete<A: ApiBackend>(&mut self, api: &A) {
        match self {
            ActivePage::Employees(page) => {
                page.controller.confirm_delete(api).await;
            }
            ActivePage::Projects(page) => {
                page.controller.confirm_delete(api).await;
            }
            ActivePage::Home | ActivePage::NotFound => {}
        }
    }
}

/// Current path plus the page mounted for it.
pub struct Shell {
    path: String,
    page: ActivePage,
}

impl Shell {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            page: ActivePage::for_route(Route::from_path(path)),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn page(&self) -> &ActivePage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ActivePage {
        &mut self.page
    }

    /// Change the path. The page is only rebuilt when the route changes, so
    /// moving within the same page keeps its state.
    pub fn navigate(&mut self, path: &str) {
        let route = Route::from_path(path);
        if route.is_none() || route != self.page.route() {
            self.page = ActivePage::for_route(route);
        }
        self.path = path.to_string();
    }

    pub fn render<B: Backend>(&mut self, frame: &mut Frame<B>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
            .split(frame.size());

        render_header(frame, chunks[0], &self.path);

        match &mut self.page {
            ActivePage::Home => render_home(frame, chunks[1]),
            ActivePage::Employees(page) => page.render(frame, chunks[1]),
            ActivePage::Projects(page) => page.render(frame, chunks[1]),
            ActivePage::NotFound => {}
        }
    }
}

fn render_header<B: Backend>(frame: &mut Frame<B>, area: Rect, path: &str) {
    let mut spans = vec![
        Span::styled(
            " ORLA ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];

    for (label, item_path) in NAV_ITEMS {
        let style = if path == item_path {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("   "));
    }

    let header = Paragraph::new(Spans::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_home<B: Backend>(frame: &mut Frame<B>, area: Rect) {
    let text = vec![
        Spans::from(""),
        Spans::from(Span::styled(
            HOME_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from(HOME_DESCRIPTION),
        Spans::from(""),
        Spans::from(Span::styled(
            "<1> Funcionários | <2> Projetos | <Q> Sair",
            Style::default().fg(Color::Gray),
        )),
    ];

    let home = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(home, area);
}
