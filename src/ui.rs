use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gpa_ledger::{
    coerce, CommandOutcome, CourseId, Created, GradeLedger, GradeScale, LedgerCommand,
    LedgerReport, SemesterId, SemesterMode,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

/// A text field the user types into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PriorCgpa,
    PriorCredits,
    CourseCredits { semester: SemesterId, course: CourseId },
    SummaryGpa(SemesterId),
    SummaryCredits(SemesterId),
}

/// One line of the calculator screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    PriorCgpa,
    PriorCredits,
    SemesterHeader(SemesterId),
    Course { semester: SemesterId, course: CourseId },
    SummaryGpa(SemesterId),
    SummaryCredits(SemesterId),
}

impl Entry {
    fn field(&self) -> Option<Field> {
        match *self {
            Entry::PriorCgpa => Some(Field::PriorCgpa),
            Entry::PriorCredits => Some(Field::PriorCredits),
            Entry::Course { semester, course } => Some(Field::CourseCredits { semester, course }),
            Entry::SummaryGpa(id) => Some(Field::SummaryGpa(id)),
            Entry::SummaryCredits(id) => Some(Field::SummaryCredits(id)),
            Entry::SemesterHeader(_) => None,
        }
    }

    fn semester(&self) -> Option<SemesterId> {
        match *self {
            Entry::SemesterHeader(id) | Entry::SummaryGpa(id) | Entry::SummaryCredits(id) => Some(id),
            Entry::Course { semester, .. } => Some(semester),
            Entry::PriorCgpa | Entry::PriorCredits => None,
        }
    }
}

pub struct App {
    pub ledger: GradeLedger,
    pub report: LedgerReport,
    pub scale: GradeScale,
    pub state: TableState,
    pub editing: Option<Field>,
    pub status: String,
    /// Raw text as typed, so "3." stays "3." while the ledger sees 3.0
    buffers: HashMap<Field, String>,
    /// Index into the scale's grade list; absent = no grade picked yet
    grade_choice: HashMap<CourseId, usize>,
}

impl App {
    pub fn new(scale: GradeScale) -> Self {
        let ledger = GradeLedger::new();
        let report = ledger.report();

        let mut state = TableState::default();
        state.select(Some(0));

        Self {
            ledger,
            report,
            scale,
            state,
            editing: None,
            status: String::new(),
            buffers: HashMap::new(),
            grade_choice: HashMap::new(),
        }
    }

    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = vec![Entry::PriorCgpa, Entry::PriorCredits];

        for semester in self.ledger.semesters() {
            entries.push(Entry::SemesterHeader(semester.id));
            match semester.mode {
                SemesterMode::Itemized => {
                    entries.extend(semester.courses.iter().map(|course| Entry::Course {
                        semester: semester.id,
                        course: course.id,
                    }));
                }
                SemesterMode::Summary => {
                    entries.push(Entry::SummaryGpa(semester.id));
                    entries.push(Entry::SummaryCredits(semester.id));
                }
            }
        }

        entries
    }

    pub fn selected_entry(&self) -> Option<Entry> {
        self.state.selected().and_then(|i| self.entries().get(i).copied())
    }

    pub fn buffer(&self, field: Field) -> &str {
        self.buffers.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn grade_letter(&self, course: CourseId) -> Option<&'static str> {
        self.grade_choice
            .get(&course)
            .and_then(|&i| self.scale.grades().get(i))
            .map(|g| g.letter)
    }

    fn dispatch(&mut self, command: LedgerCommand) -> CommandOutcome {
        let outcome = self.ledger.apply(command);
        self.report = outcome.report.clone();
        outcome
    }

    fn select_entry(&mut self, entry: Entry) {
        if let Some(i) = self.entries().iter().position(|e| *e == entry) {
            self.state.select(Some(i));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.entries().len();
        let i = self.state.selected().unwrap_or(0).min(len.saturating_sub(1));
        self.state.select(Some(i));
    }

    /// Drop raw text and grade picks for rows that no longer exist
    fn prune(&mut self) {
        let ledger = &self.ledger;
        self.buffers.retain(|field, _| match *field {
            Field::PriorCgpa | Field::PriorCredits => true,
            Field::CourseCredits { semester, course } => ledger
                .semester(semester)
                .is_some_and(|s| s.course(course).is_some()),
            Field::SummaryGpa(id) | Field::SummaryCredits(id) => ledger.semester(id).is_some(),
        });
        self.grade_choice.retain(|course, _| {
            ledger
                .semesters()
                .iter()
                .any(|s| s.course(*course).is_some())
        });
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    fn write_field(&mut self, field: Field) {
        let value = coerce(self.buffer(field));
        let command = match field {
            Field::PriorCgpa => LedgerCommand::SetPriorCgpa { value },
            Field::PriorCredits => LedgerCommand::SetPriorCredits { value },
            Field::CourseCredits { semester, course } => {
                LedgerCommand::SetCourseCredits { semester, course, value }
            }
            Field::SummaryGpa(semester) => LedgerCommand::SetSummaryGpa { semester, value },
            Field::SummaryCredits(semester) => LedgerCommand::SetSummaryCredits { semester, value },
        };
        self.dispatch(command);
    }

    pub fn type_char(&mut self, field: Field, c: char) {
        self.buffers.entry(field).or_default().push(c);
        self.write_field(field);
    }

    pub fn backspace(&mut self, field: Field) {
        if let Some(text) = self.buffers.get_mut(&field) {
            text.pop();
        }
        self.write_field(field);
    }

    /// Step the grade picker; `forward` walks toward worse grades
    pub fn cycle_grade(&mut self, semester: SemesterId, course: CourseId, forward: bool) {
        let count = self.scale.grades().len();
        let current = self.grade_choice.get(&course).copied();

        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(count - 1),
            (Some(i), true) if i + 1 < count => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            (Some(_), _) => None,
        };

        let value = match next {
            Some(i) => {
                self.grade_choice.insert(course, i);
                self.scale.grades()[i].point
            }
            None => {
                self.grade_choice.remove(&course);
                0.0
            }
        };
        self.dispatch(LedgerCommand::SetCourseGradePoint { semester, course, value });
    }

    // ------------------------------------------------------------------------
    // Structural commands
    // ------------------------------------------------------------------------

    pub fn add_semester(&mut self) {
        if let Some(Created::Semester(id)) = self.dispatch(LedgerCommand::AddSemester).created {
            self.select_entry(Entry::SemesterHeader(id));
            self.status = "Semester added".to_string();
        }
    }

    pub fn add_course(&mut self) {
        let Some(semester) = self.selected_entry().and_then(|e| e.semester()) else {
            self.status = "Select a semester first".to_string();
            return;
        };
        if self.ledger.semester(semester).map(|s| s.mode) == Some(SemesterMode::Summary) {
            self.status = "Switch to itemized mode to add courses".to_string();
            return;
        }
        if let Some(Created::Course { semester, course }) =
            self.dispatch(LedgerCommand::AddCourse { semester }).created
        {
            self.select_entry(Entry::Course { semester, course });
            self.status = "Course added".to_string();
        }
    }

    pub fn remove_selected(&mut self) {
        let command = match self.selected_entry() {
            Some(Entry::Course { semester, course }) => {
                LedgerCommand::RemoveCourse { semester, course }
            }
            Some(Entry::SemesterHeader(semester)) => LedgerCommand::RemoveSemester { semester },
            _ => return,
        };
        self.dispatch(command);
        self.prune();
        self.clamp_selection();
        self.status = "Removed".to_string();
    }

    pub fn toggle_mode(&mut self) {
        if let Some(semester) = self.selected_entry().and_then(|e| e.semester()) {
            self.dispatch(LedgerCommand::ToggleMode { semester });
            self.select_entry(Entry::SemesterHeader(semester));
        }
    }

    pub fn move_selected(&mut self, down: bool) {
        let Some(semester) = self.selected_entry().and_then(|e| e.semester()) else {
            return;
        };
        let Some(index) = self.ledger.semesters().iter().position(|s| s.id == semester) else {
            return;
        };
        let to_index = if down {
            index + 1
        } else if index > 0 {
            index - 1
        } else {
            return;
        };
        self.dispatch(LedgerCommand::MoveSemester { semester, to_index });
        self.select_entry(Entry::SemesterHeader(semester));
    }

    pub fn reset(&mut self) {
        self.dispatch(LedgerCommand::Reset);
        self.buffers.clear();
        self.grade_choice.clear();
        self.editing = None;
        self.state.select(Some(0));
        self.status = "Reset".to_string();
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn next(&mut self) {
        let len = self.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Handle one key press; returns true when the user asked to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if let Some(field) = self.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Up | KeyCode::Down => {
                    self.editing = None;
                }
                KeyCode::Backspace => self.backspace(field),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.type_char(field, c)
                }
                _ => {}
            }
            return false;
        }

        self.status.clear();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter => {
                self.editing = self.selected_entry().and_then(|e| e.field());
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(Entry::Course { semester, course }) = self.selected_entry() {
                    self.cycle_grade(semester, course, key.code == KeyCode::Right);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Char('J') => self.move_selected(true),
            KeyCode::Char('K') => self.move_selected(false),
            KeyCode::Char('m') => self.toggle_mode(),
            KeyCode::Char('s') => self.add_semester(),
            KeyCode::Char('a') => self.add_course(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Home => self.state.select(Some(0)),
            KeyCode::End => {
                let len = self.entries().len();
                self.state.select(Some(len.saturating_sub(1)));
            }
            _ => {}
        }
        false
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("ui loop failed: {:?}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // CGPA header
            Constraint::Min(0),    // Semesters
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            "GPA Ledger",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("CGPA: {}", app.report.cgpa_display),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(app.report.credits_display.clone(), Style::default().fg(Color::White)),
        Span::raw("  |  "),
        Span::styled(format!("Scale: {}", app.scale), Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn field_cell(app: &App, field: Field) -> Cell<'static> {
    let text = app.buffer(field);
    if app.editing == Some(field) {
        Cell::from(format!("{}▏", text)).style(Style::default().fg(Color::Yellow))
    } else if text.is_empty() {
        Cell::from("—").style(Style::default().fg(Color::DarkGray))
    } else {
        Cell::from(text.to_string())
    }
}

fn build_rows(app: &App) -> Vec<Row<'static>> {
    let mut course_numbers: HashMap<CourseId, usize> = HashMap::new();
    for semester in app.ledger.semesters() {
        for (i, course) in semester.courses.iter().enumerate() {
            course_numbers.insert(course.id, i + 1);
        }
    }

    app.entries()
        .into_iter()
        .map(|entry| {
            let cells = match entry {
                Entry::PriorCgpa => vec![
                    Cell::from("Previous CGPA"),
                    field_cell(app, Field::PriorCgpa),
                    Cell::from(""),
                ],
                Entry::PriorCredits => vec![
                    Cell::from("Previous Credits"),
                    field_cell(app, Field::PriorCredits),
                    Cell::from(""),
                ],
                Entry::SemesterHeader(id) => {
                    let (label, mode, gpa) = app
                        .report
                        .semester(id)
                        .map(|s| (s.label.clone(), s.mode.as_str(), s.gpa_display.clone()))
                        .unwrap_or_default();
                    vec![
                        Cell::from(label).style(
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        ),
                        Cell::from(format!("[{}]", mode)).style(Style::default().fg(Color::Magenta)),
                        Cell::from(format!("GPA {}", gpa)).style(Style::default().fg(Color::Green)),
                    ]
                }
                Entry::Course { semester, course } => {
                    let number = course_numbers.get(&course).copied().unwrap_or(0);
                    let grade = app.grade_letter(course).unwrap_or("--");
                    vec![
                        Cell::from(format!("  Course {}", number)),
                        field_cell(app, Field::CourseCredits { semester, course }),
                        Cell::from(format!("◀ {} ▶", grade)),
                    ]
                }
                Entry::SummaryGpa(id) => vec![
                    Cell::from("  Semester GPA"),
                    field_cell(app, Field::SummaryGpa(id)),
                    Cell::from(""),
                ],
                Entry::SummaryCredits(id) => vec![
                    Cell::from("  Semester Credits"),
                    field_cell(app, Field::SummaryCredits(id)),
                    Cell::from(""),
                ],
            };
            Row::new(cells).height(1)
        })
        .collect()
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Item", "Value", "Grade / GPA"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = build_rows(app);

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(16),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Semesters "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = Vec::new();

    if app.editing.is_some() {
        status_spans.push(Span::styled(" EDIT ", Style::default().fg(Color::Black).bg(Color::Yellow)));
        status_spans.push(Span::raw(" type a number | "));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" done"));
    } else {
        if !app.status.is_empty() {
            status_spans.push(Span::styled(
                format!(" {} ", app.status),
                Style::default().fg(Color::Green),
            ));
            status_spans.push(Span::raw("|"));
        }
        for (key, action) in [
            ("Enter", "Edit"),
            ("←/→", "Grade"),
            ("s", "Semester"),
            ("a", "Course"),
            ("d", "Remove"),
            ("m", "Mode"),
            ("J/K", "Move"),
            ("r", "Reset"),
        ] {
            status_spans.push(Span::raw(" "));
            status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(format!(" {} |", action)));
        }
        status_spans.push(Span::raw(" "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
