pub const PRIMARY_ADMIN_ID: &str = "primary_admin_account";

pub mod storage {

    pub const COLLABORATORS_KEY: &str = "tourist_app_collaborators";

    pub const INTERACTIONS_KEY: &str = "tourist_app_interactions";
}

pub mod labels {

    pub const OTHERS: &str = "Outros";

    pub const TOTAL: &str = "Total";

    pub const NOT_AVAILABLE: &str = "N/A";

    pub const ALL_COLLABORATORS: &str = "Todos";

    pub const REPORT_TITLE: &str = "Relatório de Atendimentos Turísticos";

    /// Month abbreviations used for month buckets and export column headers.
    pub const MONTHS: [&str; 12] = [
        "Jan.", "Fev.", "Mar.", "Abr.", "Mai.", "Jun.", "Jul.", "Ago.", "Set.", "Out.", "Nov.",
        "Dez.",
    ];
}

pub mod limits {

    pub const PAGE_SIZE: usize = 15;

    pub const TOP_GROUPS: usize = 10;

    pub const PIE_SLICES: usize = 5;

    pub const TREND_BUCKETS: usize = 30;

    pub const MAP_TOP: usize = 10;

    pub const TEMP_PASSWORD_LENGTH: usize = 8;

    /// Spreadsheet applications reject longer sheet names.
    pub const SHEET_NAME_MAX: usize = 31;

    /// Custom windows longer than this are bucketed by month.
    pub const DAY_BUCKET_MAX_DAYS: i64 = 31;
}

pub mod nationalities {

    pub const QUICK_ACCESS: &[&str] = &[
        "Portugal",
        "Espanha",
        "França",
        "Reino Unido",
        "Alemanha",
        "Bélgica",
        "Brasil",
        "EUA",
        "Itália",
        "Países Baixos",
        "Polónia",
        "Irlanda",
        "Suíça",
    ];

    /// Row order of the nationality export matrix. Anything not listed here
    /// is folded into the "Outros" row.
    pub const EXPORT_ORDER: &[&str] = &[
        "Alemanha",
        "Bélgica",
        "Brasil",
        "Espanha",
        "EUA",
        "França",
        "Itália",
        "Países Baixos",
        "Polónia",
        "Reino Unido",
        "Portugal",
        "África do Sul",
        "Albânia",
        "Andorra",
        "Angola",
        "Argentina",
        "Arménia",
        "Austrália",
        "Áustria",
        "Bangladesh",
        "Bielorrússia",
        "Bolívia",
        "Bósnia e Herzegovina",
        "Bulgária",
        "Cabo Verde",
        "Canadá",
        "Chile",
        "China",
        "Chipre",
        "Colômbia",
        "Coreia do Sul",
        "Croácia",
        "Dinamarca",
        "Egito",
        "Equador",
        "Emirados Árabes Unidos",
        "Eslováquia",
        "Eslovénia",
        "Estónia",
        "Filipinas",
        "Finlândia",
        "Geórgia",
        "Grécia",
        "Hungria",
        "Índia",
        "Indonésia",
        "Irão",
        "Iraque",
        "Irlanda",
        "Islândia",
        "Israel",
        "Japão",
        "Letónia",
        "Lituânia",
        "Luxemburgo",
        "Malásia",
        "Malta",
        "Marrocos",
        "México",
        "Moçambique",
        "Moldávia",
        "Mónaco",
        "Montenegro",
        "Noruega",
        "Nova Zelândia",
        "Peru",
        "República Checa",
        "Roménia",
        "Rússia",
        "Sérvia",
        "Singapura",
        "Suécia",
        "Suíça",
        "Tailândia",
        "Taiwan",
        "Turquia",
        "Ucrânia",
        "Uruguai",
        "Venezuela",
    ];

    pub const ALL: &[&str] = &[
        "Afeganistão", "África do Sul", "Albânia", "Alemanha", "Andorra", "Angola",
        "Antígua e Barbuda", "Arábia Saudita", "Argélia", "Argentina", "Arménia", "Austrália",
        "Áustria", "Azerbaijão", "Bahamas", "Bangladesh", "Barbados", "Barém", "Bélgica",
        "Belize", "Benim", "Bielorrússia", "Bolívia", "Bósnia e Herzegovina", "Botsuana",
        "Brasil", "Brunei", "Bulgária", "Burquina Faso", "Burundi", "Butão", "Cabo Verde",
        "Camarões", "Camboja", "Canadá", "Catar", "Cazaquistão", "Chade", "Chile", "China",
        "Chipre", "Colômbia", "Comores", "Congo-Brazzaville", "Congo-Kinshasa",
        "Coreia do Norte", "Coreia do Sul", "Costa do Marfim", "Costa Rica", "Croácia", "Cuba",
        "Dinamarca", "Djibuti", "Dominica", "Egito", "El Salvador", "Emirados Árabes Unidos",
        "Equador", "Eritreia", "Eslováquia", "Eslovénia", "Espanha", "Estado da Palestina",
        "Estados Unidos", "Estónia", "Etiópia", "Fiji", "Filipinas", "Finlândia", "França",
        "Gabão", "Gâmbia", "Gana", "Geórgia", "Granada", "Grécia", "Guatemala", "Guiana",
        "Guiné", "Guiné Equatorial", "Guiné-Bissau", "Haiti", "Honduras", "Hungria", "Iémen",
        "Ilhas Marshall", "Ilhas Salomão", "Índia", "Indonésia", "Irão", "Iraque", "Irlanda",
        "Islândia", "Israel", "Itália", "Jamaica", "Japão", "Jordânia", "Kiribati", "Kuwait",
        "Laos", "Lesoto", "Letónia", "Líbano", "Libéria", "Líbia", "Liechtenstein", "Lituânia",
        "Luxemburgo", "Macedónia do Norte", "Madagáscar", "Malásia", "Maláui", "Maldivas",
        "Mali", "Malta", "Marrocos", "Maurícia", "Mauritânia", "México", "Mianmar",
        "Micronésia", "Moçambique", "Moldávia", "Mónaco", "Mongólia", "Montenegro", "Namíbia",
        "Nauru", "Nepal", "Nicarágua", "Níger", "Nigéria", "Noruega", "Nova Zelândia", "Omã",
        "Países Baixos", "Palau", "Panamá", "Papua-Nova Guiné", "Paquistão", "Paraguai", "Peru",
        "Polónia", "Portugal", "Quénia", "Quirguistão", "Reino Unido",
        "República Centro-Africana", "República Checa", "República Dominicana", "Roménia",
        "Ruanda", "Rússia", "Samoa", "Santa Lúcia", "São Cristóvão e Neves", "São Marinho",
        "São Tomé e Príncipe", "São Vicente e Granadinas", "Senegal", "Sérvia", "Serra Leoa",
        "Seicheles", "Singapura", "Síria", "Somália", "Sri Lanka", "Suazlândia", "Sudão",
        "Sudão do Sul", "Suécia", "Suíça", "Suriname", "Tailândia", "Taiwan", "Tajiquistão",
        "Tanzânia", "Timor-Leste", "Togo", "Tonga", "Trindade e Tobago", "Tunísia",
        "Turcomenistão", "Turquia", "Tuvalu", "Ucrânia", "Uganda", "Uruguai", "Usbequistão",
        "Vanuatu", "Vaticano", "Venezuela", "Vietname", "Zâmbia", "Zimbabué",
    ];

    /// ISO 3166-1 alpha-2 codes for the names the world map knows about.
    pub const COUNTRY_CODES: &[(&str, &str)] = &[
        ("Portugal", "PT"),
        ("Espanha", "ES"),
        ("França", "FR"),
        ("Reino Unido", "GB"),
        ("Alemanha", "DE"),
        ("Bélgica", "BE"),
        ("Brasil", "BR"),
        ("EUA", "US"),
        ("Itália", "IT"),
        ("Países Baixos", "NL"),
        ("Polónia", "PL"),
        ("Irlanda", "IE"),
        ("Suíça", "CH"),
        ("Canadá", "CA"),
        ("Austrália", "AU"),
        ("Argentina", "AR"),
        ("China", "CN"),
        ("Japão", "JP"),
        ("Rússia", "RU"),
        ("Índia", "IN"),
        ("África do Sul", "ZA"),
        ("Suécia", "SE"),
        ("Noruega", "NO"),
        ("Dinamarca", "DK"),
        ("Áustria", "AT"),
        ("México", "MX"),
        ("Coreia do Sul", "KR"),
        ("Estados Unidos", "US"),
    ];

    #[must_use]
    pub fn country_code(name: &str) -> Option<&'static str> {
        COUNTRY_CODES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| *code)
    }
}

pub mod visit_reasons {

    /// Suggested visit reasons, already in Portuguese collation order.
    pub const SUGGESTED: &[&str] = &[
        "Alojamento",
        "Animação Nocturna",
        "Arquitectura",
        "Caminhos de Santiago",
        "Compras ou comércio",
        "Gastronomia",
        "Informação Transportes",
        "Informação Turística de Braga",
        "Informação Turística de outros destinos",
        "Lazer",
        "Localização ruas (Mapas)",
        "Outros",
        "Programação cultural ou publicações",
        "Vendas de Produtos",
        "Visitas Guiadas",
    ];
}
