//! pt-BR word lists used by the fake provider

pub const FIRST_NAMES: &[&str] = &[
    "Ana", "Beatriz", "Bruno", "Camila", "Carlos", "Cecília", "Daniel", "Eduarda", "Felipe",
    "Fernanda", "Gabriel", "Helena", "Igor", "Isabela", "João", "Júlia", "Lucas", "Luana",
    "Marcelo", "Mariana", "Matheus", "Natália", "Otávio", "Patrícia", "Rafael", "Renata",
    "Samuel", "Sofia", "Thiago", "Valentina", "Vinícius", "Yasmin",
];

pub const SURNAMES: &[&str] = &[
    "Almeida", "Araújo", "Barbosa", "Cardoso", "Carvalho", "Castro", "Costa", "Dias",
    "Fernandes", "Ferreira", "Gomes", "Lima", "Martins", "Melo", "Moreira", "Nascimento",
    "Oliveira", "Pereira", "Ribeiro", "Rocha", "Rodrigues", "Santos", "Silva", "Souza",
    "Teixeira", "Vieira",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com", "hotmail.com", "yahoo.com.br", "uol.com.br", "bol.com.br", "outlook.com",
];

pub const COMPANY_SUFFIXES: &[&str] = &["Ltda.", "S.A.", "ME", "EIRELI"];

pub const FANTASY_WORDS: &[&str] = &[
    "Alfa", "Aurora", "Brasil", "Central", "Delta", "Estrela", "Global", "Horizonte", "Ideal",
    "Nova", "Nobre", "Primavera", "Real", "Sol", "Tropical", "União", "Vale", "Vitória",
];

pub const FANTASY_NOUNS: &[&str] = &[
    "Comércio", "Distribuidora", "Alimentos", "Materiais", "Tecnologia", "Serviços",
    "Atacado", "Logística", "Indústria", "Importados",
];

pub const STREET_PREFIXES: &[&str] = &[
    "Rua", "Avenida", "Travessa", "Alameda", "Praça", "Rodovia", "Estrada",
];

pub const STREET_NAMES: &[&str] = &[
    "das Flores", "Sete de Setembro", "XV de Novembro", "Tiradentes", "Dom Pedro II",
    "Marechal Deodoro", "Santos Dumont", "Getúlio Vargas", "Rio Branco", "da Liberdade",
    "Castro Alves", "São João", "Paulista", "Brasil", "Independência",
];

pub const DISTRICTS: &[&str] = &[
    "Centro", "Jardim América", "Vila Nova", "Boa Vista", "Santa Cecília", "Bela Vista",
    "Liberdade", "Copacabana", "Moinhos de Vento", "Savassi", "Funcionários", "Aldeota",
    "Boa Viagem", "Batel", "Itaim Bibi",
];

pub const CITIES: &[&str] = &[
    "São Paulo", "Rio de Janeiro", "Belo Horizonte", "Porto Alegre", "Curitiba", "Salvador",
    "Recife", "Fortaleza", "Goiânia", "Campinas", "Florianópolis", "Manaus", "Belém",
    "Natal", "Vitória", "Uberlândia",
];

pub const STATES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub const PRODUCT_ADJECTIVES: &[&str] = &[
    "Adaptável", "Avançado", "Compatível", "Ergonômico", "Inovador", "Integrado",
    "Multicamadas", "Otimizado", "Reforçado", "Sustentável", "Universal", "Versátil",
];

pub const PRODUCT_NOUNS: &[&str] = &[
    "conjunto", "kit", "módulo", "painel", "sistema", "suporte", "adaptador", "componente",
    "dispositivo", "acessório",
];

pub const PRODUCT_TRAITS: &[&str] = &[
    "de alta performance", "para uso contínuo", "com garantia estendida", "de baixo consumo",
    "de fácil instalação", "resistente à água", "de nova geração", "com acabamento premium",
];
