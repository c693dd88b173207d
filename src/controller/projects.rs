use std::collections::HashSet;

use chrono::NaiveDate;

use super::{EntityForm, EntityKind, FieldKind, Messages, ValidationFeedback};
use crate::format::display_optional_date;
use crate::models::{Employee, IdRef, Project, ProjectPayload};

pub struct Projects;

impl EntityKind for Projects {
    type Record = Project;
    type Related = Employee;
    type Form = ProjectForm;

    const ROUTE: &'static str = "/projetos";
    const FEEDBACK: ValidationFeedback = ValidationFeedback::Inline;
    const MESSAGES: Messages = Messages {
        fetch_records: "Erro ao buscar projetos",
        fetch_related: "Erro ao buscar funcionários",
        save: "Erro ao salvar projeto",
        delete: "Erro ao deletar projeto",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Nome,
    DataCriacao,
    Funcionarios,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub nome: String,
    pub data_criacao: Option<NaiveDate>,
    pub funcionario_ids: Vec<i64>,
}

impl EntityForm for ProjectForm {
    type Field = ProjectField;
    type Record = Project;
    type Payload = ProjectPayload;

    const FIELDS: &'static [ProjectField] = &[
        ProjectField::Nome,
        ProjectField::DataCriacao,
        ProjectField::Funcionarios,
    ];

    fn from_record(project: &Project) -> Self {
        Self {
            nome: project.nome.clone(),
            data_criacao: project.data_criacao,
            funcionario_ids: project.employee_ids(),
        }
    }

    fn kind(field: ProjectField) -> FieldKind {
        match field {
            ProjectField::Nome => FieldKind::Text,
            ProjectField::DataCriacao => FieldKind::Date,
            ProjectField::Funcionarios => FieldKind::Association,
        }
    }

    fn text(&self, field: ProjectField) -> String {
        match field {
            ProjectField::Nome => self.nome.clone(),
            ProjectField::DataCriacao => display_optional_date(self.data_criacao),
            ProjectField::Funcionarios => String::new(),
        }
    }

    fn set_text(&mut self, field: ProjectField, value: &str) {
        if field == ProjectField::Nome {
            self.nome = value.to_string();
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        self.data_criacao
    }

    fn set_date(&mut self, date: Option<NaiveDate>) {
        self.data_criacao = date;
    }

    fn selection(&self) -> &[i64] {
        &self.funcionario_ids
    }

    fn set_selection(&mut self, ids: Vec<i64>) {
        self.funcionario_ids = ids;
    }

    fn missing(&self) -> HashSet<ProjectField> {
        let mut missing = HashSet::new();
        if self.nome.is_empty() {
            missing.insert(ProjectField::Nome);
        }
        if self.data_criacao.is_none() {
            missing.insert(ProjectField::DataCriacao);
        }
        if self.funcionario_ids.is_empty() {
            missing.insert(ProjectField::Funcionarios);
        }
        missing
    }

    fn payload(&self) -> ProjectPayload {
        ProjectPayload {
            nome: self.nome.clone(),
            data_criacao: self.data_criacao,
            funcionarios: IdRef::from_ids(&self.funcionario_ids),
        }
    }
}
