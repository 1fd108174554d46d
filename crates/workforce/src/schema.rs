//! Column names, policy constants and categorical types.
//!
//! The raw exports come out of the payroll system with fixed Portuguese
//! headers; the persisted dataset keeps those names plus the derived
//! columns below, so every stage and every metric addresses columns through
//! these constants.

use derive_more::Display;

// ---------------------------------------------------------------------------
// Raw input columns
// ---------------------------------------------------------------------------

/// Worker full name.
pub const NAME: &str = "Nome";
/// Cost-center code.
pub const COST_CENTER: &str = "C.Custo";
/// Cost-center description.
pub const COST_CENTER_DESC: &str = "Descrição (C.Custo)";
/// Short role title.
pub const ROLE: &str = "Título Reduzido (Cargo)";
/// Birth date.
pub const BIRTH_DATE: &str = "Nascimento";
/// Hire date.
pub const HIRE_DATE: &str = "Admissão";
/// Separation date (null while the worker is active).
pub const SEPARATION_DATE: &str = "Data Afastamento";
/// Raw status code.
pub const STATUS_CODE: &str = "Situação";
/// Raw cause-of-exit code.
pub const EXIT_CAUSE_CODE: &str = "Causa";

/// Known-irrelevant columns removed when present.
pub const DROPPED_COLUMNS: &[&str] = &["Posição do Local", "Cadastro"];

/// The three nullable date columns, cleaned as a group.
pub const DATE_COLUMNS: &[&str] = &[BIRTH_DATE, HIRE_DATE, SEPARATION_DATE];

// ---------------------------------------------------------------------------
// Derived columns
// ---------------------------------------------------------------------------

/// Age in whole years (0 = unknown).
pub const AGE: &str = "Idade";
/// Hire month (0 = unknown).
pub const HIRE_MONTH: &str = "Mes_Admissao";
/// Hire year (0 = unknown).
pub const HIRE_YEAR: &str = "Ano_Admissao";
/// Separation month (0 = unknown / not separated).
pub const SEPARATION_MONTH: &str = "Mes_Afastamento";
/// Separation year (0 = unknown / not separated).
pub const SEPARATION_YEAR: &str = "Ano_Afastamento";
/// Human-readable exit cause.
pub const EXIT_CAUSE_LABEL: &str = "Causa Escrita";
/// Human-readable status.
pub const STATUS_LABEL: &str = "Situacao Escrita";
/// Resolved employment state, see [`EmploymentState`].
pub const EMPLOYMENT_STATE: &str = "Situacao_res";
/// Business area, see [`Area`]. Holds the `"0"` sentinel between the
/// cost-center lookup and the unification drop rule.
pub const AREA: &str = "Area";
/// Worker type tag, see [`WorkerType`].
pub const WORKER_TYPE: &str = "TIPO";
/// Tenure in days, clamped at 0.
pub const TENURE_DAYS: &str = "Tempo_Casa_Dias";
/// Tenure in months, one decimal.
pub const TENURE_MONTHS: &str = "Tempo_Casa_Meses";
/// Tenure in years, two decimals.
pub const TENURE_YEARS: &str = "Anos_de_Casa";

/// Canonical column order of the persisted dataset. Both worker-type frames
/// are projected onto this list before concatenation, which keeps the
/// output byte-stable across runs.
pub const UNIFIED_COLUMNS: &[&str] = &[
    NAME,
    COST_CENTER,
    COST_CENTER_DESC,
    ROLE,
    BIRTH_DATE,
    HIRE_DATE,
    SEPARATION_DATE,
    STATUS_CODE,
    EXIT_CAUSE_CODE,
    AGE,
    HIRE_MONTH,
    HIRE_YEAR,
    SEPARATION_MONTH,
    SEPARATION_YEAR,
    EXIT_CAUSE_LABEL,
    STATUS_LABEL,
    EMPLOYMENT_STATE,
    AREA,
    WORKER_TYPE,
    TENURE_DAYS,
    TENURE_MONTHS,
    TENURE_YEARS,
];

/// Columns of the derived tenure table (`tempo_de_casa.csv`).
pub const TENURE_COLUMNS: &[&str] = &[
    NAME,
    AREA,
    EMPLOYMENT_STATE,
    WORKER_TYPE,
    HIRE_DATE,
    SEPARATION_DATE,
    TENURE_DAYS,
    TENURE_MONTHS,
    TENURE_YEARS,
];

// ---------------------------------------------------------------------------
// Cleaning and policy constants
// ---------------------------------------------------------------------------

/// Values treated as a missing date before parsing.
pub const DATE_SENTINELS: &[&str] = &["", " ", "0", "00/00/0000", "--", "NaT", "nan"];

/// Role fragments excluded from the salaried roster (apprentices, interns).
pub const SALARIED_ROLE_EXCLUSIONS: &[&str] = &["JOVEM APRENDIZ|ESTAGIARI[OA]|APRENDIZ"];

/// Role fragments excluded from the contractor roster: outsourced service
/// roles plus an explicit list of support roles kept out of headcount.
pub const CONTRACTOR_ROLE_EXCLUSIONS: &[&str] = &[
    r"PRESTADOR DE SERVIÇO|SERVENTE DE ZELADORIA|ESPEC\.? DE SERV\.? DE LAVANDERIA",
    "MEDICO DE TRABALHO|FAXINEIRO|MODELO DE PROVA|NUTRICIONISTA|SECRETARIA|MOTORISTA\
     |PROFESSOR DE INGLES|ESTOQUISTA|IMPRESSOR DE ADESIVOS|ZELADORA|ZELADOR|VIGILANTE\
     |COACHING|AN ADM PESSOAL I",
];

/// Status labels counted as active. Policy constant, not user-configurable.
pub const ACTIVE_STATUS_LABELS: &[&str] =
    &["Trabalhando", "Férias", "Licença Maternidade", "Atestado Médico"];

/// Closed-location name fragments; salaried records from these cost centers
/// are dropped at unification.
pub const CLOSED_LOCATION_KEYWORDS: &[&str] = &["OUTLET TIJUCAS", "CONTINENTE PARK SHOPPING"];

/// Exit-cause labels that do not count as churn (period exits only).
pub const NON_CHURN_EXIT_CAUSES: &[&str] = &["ATIVO", "Morte"];

/// Label for cause/status codes absent from the lookup tables.
pub const UNKNOWN_LABEL: &str = "Desconhecida";

/// Sentinel for cost-center codes absent from the area-group table.
pub const UNMAPPED_AREA: &str = "0";

/// Synthetic cost-center row aggregating below-threshold centers.
pub const SMALL_CENTERS_LABEL: &str = "OUTROS (Centros Pequenos)";

// ---------------------------------------------------------------------------
// Categorical types
// ---------------------------------------------------------------------------

/// Worker type tag applied at unification.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerType {
    /// Salaried employee (CLT regime)
    #[display("CLT")]
    Salaried,
    /// Contractor (PJ regime)
    #[display("PJ")]
    Contractor,
}

impl WorkerType {
    /// Dataset label for this worker type.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Salaried => "CLT",
            Self::Contractor => "PJ",
        }
    }

    /// Role-exclusion patterns applied to this worker type's roster.
    pub const fn role_exclusions(self) -> &'static [&'static str] {
        match self {
            Self::Salaried => SALARIED_ROLE_EXCLUSIONS,
            Self::Contractor => CONTRACTOR_ROLE_EXCLUSIONS,
        }
    }
}

/// Resolved employment state.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentState {
    /// Working, on vacation, or on leave types counted as active
    #[display("Ativo")]
    Active,
    /// Every other status
    #[display("Desligado/Afastado")]
    Separated,
}

impl EmploymentState {
    /// Dataset label for this state.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Separated => "Desligado/Afastado",
        }
    }
}

/// Business area a cost center classifies into.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// Store network
    #[display("Varejo")]
    Retail,
    /// Supply chain / manufacturing
    #[display("Indústria")]
    Industry,
    /// Everything else
    #[display("Matriz")]
    Headquarters,
}

impl Area {
    /// All areas, in dataset label order.
    pub const ALL: [Self; 3] = [Self::Retail, Self::Industry, Self::Headquarters];

    /// Dataset label for this area.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Retail => "Varejo",
            Self::Industry => "Indústria",
            Self::Headquarters => "Matriz",
        }
    }

    /// Parse a dataset label back into an area.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label)
    }
}
