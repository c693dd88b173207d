use tui::{
    style::{Modifier, Style},
    text::{Span, Spans},
};

use crate::controller::{ProjectField, ProjectForm, Projects};
use crate::format::display_optional_date;
use crate::models::{AssociationRef, Employee, Project, Record};
use crate::ui::page::PageView;

impl PageView for Projects {
    const TITLE: &'static str = "Projetos";
    const NOUN: &'static str = "Projeto";
    const DELETE_QUESTION: &'static str = "Você tem certeza que deseja excluir este projeto?";
    const ASSOCIATION_TITLE: &'static str = "Funcionários:";
    const EMPTY_ASSOCIATION: &'static str = "Nenhum funcionário associado";

    fn details(project: &Project) -> Vec<Spans<'static>> {
        vec![
            Spans::from(Span::styled(
                project.nome.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(format!(
                "Data de Criação: {}",
                display_optional_date(project.data_criacao)
            )),
        ]
    }

    fn associations(project: &Project) -> &[AssociationRef] {
        &project.funcionarios
    }

    fn field_label(field: ProjectField) -> &'static str {
        match field {
            ProjectField::Nome => "Nome *",
            ProjectField::DataCriacao => "Data de Criação *",
            ProjectField::Funcionarios => "Funcionários *",
        }
    }

    fn field_error(field: ProjectField) -> &'static str {
        match field {
            ProjectField::Nome => "Nome é obrigatório",
            ProjectField::DataCriacao => "Data de Criação é obrigatória",
            ProjectField::Funcionarios => "Funcionários são obrigatórios",
        }
    }

    /// Selected names on one line, in selection order.
    fn selection_summary(form: &ProjectForm, employees: &[Employee]) -> Vec<Spans<'static>> {
        let names: Vec<&str> = form
            .funcionario_ids
            .iter()
            .map(|id| {
                employees
                    .iter()
                    .find(|e| e.id() == *id)
                    .map(Record::nome)
                    .unwrap_or("")
            })
            .collect();
        vec![Spans::from(names.join(", "))]
    }
}
