use serde::{Deserialize, Deserializer, Serialize};

use super::{AssociationRef, IdRef, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cpf: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    pub salario: f64,
    #[serde(default)]
    pub projetos: Vec<AssociationRef>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Employee {
    pub fn project_ids(&self) -> Vec<i64> {
        self.projetos.iter().map(|p| p.id).collect()
    }
}

impl Record for Employee {
    fn id(&self) -> i64 {
        self.id
    }

    fn nome(&self) -> &str {
        &self.nome
    }
}

/// Body of `POST /funcionarios` and `PUT /funcionarios/{id}`.
///
/// `cpf` always carries the unmasked digits, even when the stored value was
/// masked, so saving an edited employee rewrites its CPF as bare digits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePayload {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub salario: String,
    pub projetos: Vec<IdRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_employee() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 4,
            "nome": "Ana",
            "cpf": "12345678901",
            "email": "ana@x.com",
            "salario": 5000.5,
            "projetos": [{"id": 2, "nome": "X", "dataCriacao": "2024-01-01"}]
        }))
        .unwrap();

        assert_eq!(employee.id, 4);
        assert_eq!(employee.salario, 5000.5);
        assert_eq!(employee.project_ids(), vec![2]);
        assert_eq!(employee.projetos[0].nome, "X");
    }

    #[test]
    fn missing_projects_default_to_empty() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 1,
            "nome": "Bruno",
            "cpf": "",
            "email": "b@x.com",
            "salario": 10
        }))
        .unwrap();

        assert!(employee.projetos.is_empty());
    }

    #[test]
    fn null_or_absent_cpf_decodes_as_empty() {
        let employees: Vec<Employee> = serde_json::from_value(json!([
            {"id": 1, "nome": "Bruno", "cpf": null, "email": "b@x.com", "salario": 10},
            {"id": 2, "nome": "Carla", "email": null, "salario": 20}
        ]))
        .unwrap();

        assert_eq!(employees[0].cpf, "");
        assert_eq!(employees[1].cpf, "");
        assert_eq!(employees[1].email, "");
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let payload = EmployeePayload {
            nome: "Ana".into(),
            cpf: "12345678901".into(),
            email: "ana@x.com".into(),
            salario: "5000".into(),
            projetos: IdRef::from_ids(&[1, 3]),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "nome": "Ana",
                "cpf": "12345678901",
                "email": "ana@x.com",
                "salario": "5000",
                "projetos": [{"id": 1}, {"id": 3}]
            })
        );
    }
}
