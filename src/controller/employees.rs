use std::collections::HashSet;

use super::{EntityForm, EntityKind, FieldKind, Messages, ValidationFeedback};
use crate::format::{cpf_digits, mask_cpf};
use crate::models::{Employee, EmployeePayload, IdRef, Project};

pub struct Employees;

impl EntityKind for Employees {
    type Record = Employee;
    type Related = Project;
    type Form = EmployeeForm;

    const ROUTE: &'static str = "/funcionarios";
    const FEEDBACK: ValidationFeedback = ValidationFeedback::Modal;
    const MESSAGES: Messages = Messages {
        fetch_records: "Erro ao buscar funcionários",
        fetch_related: "Erro ao buscar projetos",
        save: "Erro ao salvar funcionário",
        delete: "Erro ao deletar funcionário",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Nome,
    Cpf,
    Email,
    Salario,
    Projetos,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeForm {
    pub nome: String,
    /// Masked as typed.
    pub cpf: String,
    pub email: String,
    pub salario: String,
    pub projeto_ids: Vec<i64>,
}

impl EntityForm for EmployeeForm {
    type Field = EmployeeField;
    type Record = Employee;
    type Payload = EmployeePayload;

    const FIELDS: &'static [EmployeeField] = &[
        EmployeeField::Nome,
        EmployeeField::Cpf,
        EmployeeField::Email,
        EmployeeField::Salario,
        EmployeeField::Projetos,
    ];

    fn from_record(employee: &Employee) -> Self {
        Self {
            nome: employee.nome.clone(),
            cpf: mask_cpf(&employee.cpf),
            email: employee.email.clone(),
            salario: employee.salario.to_string(),
            projeto_ids: employee.project_ids(),
        }
    }

    fn kind(field: EmployeeField) -> FieldKind {
        match field {
            EmployeeField::Projetos => FieldKind::Association,
            _ => FieldKind::Text,
        }
    }

    fn text(&self, field: EmployeeField) -> String {
        match field {
            EmployeeField::Nome => self.nome.clone(),
            EmployeeField::Cpf => self.cpf.clone(),
            EmployeeField::Email => self.email.clone(),
            EmployeeField::Salario => self.salario.clone(),
            EmployeeField::Projetos => String::new(),
        }
    }

    fn set_text(&mut self, field: EmployeeField, value: &str) {
        match field {
            EmployeeField::Nome => self.nome = value.to_string(),
            EmployeeField::Cpf => self.cpf = mask_cpf(value),
            EmployeeField::Email => self.email = value.to_string(),
            EmployeeField::Salario => self.salario = value.to_string(),
            EmployeeField::Projetos => {}
        }
    }

    fn selection(&self) -> &[i64] {
        &self.projeto_ids
    }

    fn set_selection(&mut self, ids: Vec<i64>) {
        self.projeto_ids = ids;
    }

    fn missing(&self) -> HashSet<EmployeeField> {
        let mut missing = HashSet::new();
        if self.nome.is_empty() {
            missing.insert(EmployeeField::Nome);
        }
        if self.cpf.is_empty() {
            missing.insert(EmployeeField::Cpf);
        }
        if self.email.is_empty() {
            missing.insert(EmployeeField::Email);
        }
        if self.salario.is_empty() {
            missing.insert(EmployeeField::Salario);
        }
        if self.projeto_ids.is_empty() {
            missing.insert(EmployeeField::Projetos);
        }
        missing
    }

    fn payload(&self) -> EmployeePayload {
        EmployeePayload {
            nome: self.nome.clone(),
            cpf: cpf_digits(&self.cpf),
            email: self.email.clone(),
            salario: self.salario.clone(),
            projetos: IdRef::from_ids(&self.projeto_ids),
        }
    }
}
