use tui::{
    style::{Modifier, Style},
    text::{Span, Spans},
};

use crate::controller::{EmployeeField, EmployeeForm, Employees};
use crate::format::{format_salary, mask_cpf};
use crate::models::{AssociationRef, Employee, Project, names_for_ids};
use crate::ui::page::PageView;

impl PageView for Employees {
    const TITLE: &'static str = "Funcionários";
    const NOUN: &'static str = "Funcionário";
    const DELETE_QUESTION: &'static str = "Você tem certeza que deseja excluir este funcionário?";
    const ASSOCIATION_TITLE: &'static str = "Projetos:";
    const EMPTY_ASSOCIATION: &'static str = "Nenhum projeto associado";

    fn details(employee: &Employee) -> Vec<Spans<'static>> {
        vec![
            Spans::from(Span::styled(
                employee.nome.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(format!("CPF: {}", mask_cpf(&employee.cpf))),
            Spans::from(format!("Email: {}", employee.email)),
            Spans::from(format!("Salário: {}", format_salary(employee.salario))),
        ]
    }

    fn associations(employee: &Employee) -> &[AssociationRef] {
        &employee.projetos
    }

    fn field_label(field: EmployeeField) -> &'static str {
        match field {
            EmployeeField::Nome => "Nome *",
            EmployeeField::Cpf => "CPF *",
            EmployeeField::Email => "Email *",
            EmployeeField::Salario => "Salário *",
            EmployeeField::Projetos => "Projetos",
        }
    }

    fn field_error(field: EmployeeField) -> &'static str {
        match field {
            EmployeeField::Nome => "Nome é obrigatório",
            EmployeeField::Cpf => "CPF é obrigatório",
            EmployeeField::Email => "Email é obrigatório",
            EmployeeField::Salario => "Salário é obrigatório",
            EmployeeField::Projetos => "Selecione ao menos um projeto",
        }
    }

    /// One row per selected project.
    fn selection_summary(form: &EmployeeForm, projects: &[Project]) -> Vec<Spans<'static>> {
        names_for_ids(projects, &form.projeto_ids)
            .into_iter()
            .map(|name| Spans::from(name.to_string()))
            .collect()
    }

    fn submit_label(editing: bool) -> &'static str {
        if editing { "Salvar" } else { "Adicionar" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::CrudController;
    use crate::controller::testing::RecordingBackend;
    use crate::ui::page::{PageInput, PageState, handle_key};
    use crossterm::event::KeyCode;
    use serde_json::json;

    fn press(state: &mut PageState, controller: &mut CrudController<Employees>, keys: &[KeyCode]) {
        for &key in keys {
            handle_key(state, controller, key);
        }
    }

    fn type_text(state: &mut PageState, controller: &mut CrudController<Employees>, text: &str) {
        for c in text.chars() {
            handle_key(state, controller, KeyCode::Char(c));
        }
    }

    async fn mounted() -> (RecordingBackend, CrudController<Employees>) {
        let api = RecordingBackend::default()
            .with_collection("/funcionarios", json!([]))
            .with_collection(
                "/projetos",
                json!([
                    {"id": 1, "nome": "Portal", "dataCriacao": "2024-01-01", "funcionarios": []},
                    {"id": 2, "nome": "App", "dataCriacao": "2024-02-01", "funcionarios": []}
                ]),
            );
        let mut controller = CrudController::<Employees>::new();
        controller.mount(&api).await;
        api.clear_calls();
        (api, controller)
    }

    #[test]
    fn details_show_masked_cpf_and_salary() {
        let employee = Employee {
            id: 1,
            nome: "Ana".into(),
            cpf: "12345678901".into(),
            email: "ana@x.com".into(),
            salario: 5000.0,
            projetos: vec![],
        };

        let lines: Vec<String> = Employees::details(&employee)
            .into_iter()
            .map(|spans| spans.0.into_iter().map(|s| s.content.into_owned()).collect())
            .collect();

        assert_eq!(
            lines,
            vec!["Ana", "CPF: 123.456.789-01", "Email: ana@x.com", "Salário: R$5000.00"]
        );
    }

    #[test]
    fn selected_projects_are_listed_one_per_row() {
        let projects = vec![
            Project { id: 1, nome: "Portal".into(), data_criacao: None, funcionarios: vec![] },
            Project { id: 2, nome: "App".into(), data_criacao: None, funcionarios: vec![] },
        ];
        let form = EmployeeForm { projeto_ids: vec![2, 1], ..Default::default() };

        assert_eq!(Employees::selection_summary(&form, &projects).len(), 2);
    }

    #[tokio::test]
    async fn typing_cpf_in_the_form_masks_progressively() {
        let (_api, mut controller) = mounted().await;
        let mut state = PageState::new();

        assert_eq!(
            handle_key(&mut state, &mut controller, KeyCode::Char('n')),
            PageInput::Handled
        );
        press(&mut state, &mut controller, &[KeyCode::Down, KeyCode::Enter]);
        type_text(&mut state, &mut controller, "123x456");
        assert_eq!(controller.form().cpf, "123.456");

        press(&mut state, &mut controller, &[KeyCode::Backspace]);
        assert_eq!(controller.form().cpf, "123.45");
    }

    #[tokio::test]
    async fn picker_toggles_projects_and_submit_is_reported() {
        let (api, mut controller) = mounted().await;
        let mut state = PageState::new();
        press(&mut state, &mut controller, &[KeyCode::Char('n')]);

        // Last field is the project picker.
        press(&mut state, &mut controller, &[KeyCode::Up, KeyCode::Enter]);
        press(&mut state, &mut controller, &[KeyCode::Down, KeyCode::Char(' ')]);
        press(&mut state, &mut controller, &[KeyCode::Up, KeyCode::Char(' ')]);
        assert_eq!(controller.form().projeto_ids, vec![2, 1]);

        press(&mut state, &mut controller, &[KeyCode::Char(' ')]);
        assert_eq!(controller.form().projeto_ids, vec![2]);

        press(&mut state, &mut controller, &[KeyCode::Enter]);
        assert_eq!(
            handle_key(&mut state, &mut controller, KeyCode::Char('s')),
            PageInput::Submit
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn unused_list_keys_fall_through_to_the_shell() {
        let (_api, mut controller) = mounted().await;
        let mut state = PageState::new();

        assert_eq!(
            handle_key(&mut state, &mut controller, KeyCode::Char('2')),
            PageInput::Ignored
        );
        // Nothing selected on an empty list, so delete does nothing.
        press(&mut state, &mut controller, &[KeyCode::Char('d')]);
        assert_eq!(controller.delete_target(), None);
    }
}
