//! Built-in subject tables, grouped by scheme → program → term.

use super::{Program, TermGroup};
use crate::scheme::Scheme;

/// `(code, name, credits, category)`.
pub(super) type SubjectRow = (&'static str, &'static str, u32, &'static str);

pub(super) struct TermTable {
    pub scheme: Scheme,
    pub program: Program,
    pub group: TermGroup,
    pub rows: &'static [SubjectRow],
}

pub(super) static TABLES: &[TermTable] = &[
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(1),
        rows: &[
            ("BMATS101", "MATHEMATICS-I FOR CSE STREAM", 4, "ASC"),
            ("BPHYS102", "APPLIED PHYSICS FOR CSE STREAM", 4, "ASC"),
            ("BCHES102", "APPLIED CHEMISTRY FOR CSE STREAM", 4, "ASC"),
            ("BPOPS103", "PRINCIPLES OF PROGRAMMING USING C", 3, "ESC"),
            ("BCEDK103", "COMPUTER-AIDED ENGINEERING DRAWING", 3, "ESC"),
            ("BESCK104A", "INTRODUCTION TO CIVIL ENGINEERING", 3, "ESC-I"),
            ("BESCK104B", "INTRODUCTION TO ELECTRICAL ENGINEERING", 3, "ESC-I"),
            ("BESCK104C", "INTRODUCTION TO ELECTRONICS COMMUNICATION", 3, "ESC-I"),
            ("BESCK104D", "INTRODUCTION TO MECHANICAL ENGINEERING", 3, "ESC-I"),
            ("BESCK104E", "INTRODUCTION TO C PROGRAMMING", 3, "ESC-I"),
            ("BETCK105A", "SMART MATERIALS AND SYSTEMS", 3, "ETC-I"),
            ("BETCK105B", "GREEN BUILDINGS", 3, "ETC-I"),
            ("BETCK105C", "INTRODUCTION TO NANO TECHNOLOGY", 3, "ETC-I"),
            ("BETCK105D", "INTRODUCTION TO SUSTAINABLE ENGINEERING", 3, "ETC-I"),
            ("BETCK105E", "RENEWABLE ENERGY SOURCES", 3, "ETC-I"),
            ("BETCK105F", "WASTE MANAGEMENT", 3, "ETC-I"),
            ("BETCK105G", "EMERGING APPLICATIONS OF BIOSENSORS", 3, "ETC-I"),
            ("BETCK105H", "INTRODUCTION TO INTERNET OF THINGS (IOT)", 3, "ETC-I"),
            ("BETCK105I", "INTRODUCTION TO CYBER SECURITY", 3, "ETC-I"),
            ("BETCK105J", "INTRODUCTION TO EMBEDDED SYSTEM", 3, "ETC-I"),
            ("BPLCK105A", "INTRODUCTION TO WEB PROGRAMMING", 3, "PLC-I"),
            ("BPLCK105B", "INTRODUCTION TO PYTHON PROGRAMMING", 3, "PLC-I"),
            ("BPLCK105C", "BASICS OF JAVA PROGRAMMING", 3, "PLC-I"),
            ("BPLCK105D", "INTRODUCTION TO C++ PROGRAMMING", 3, "PLC-I"),
            ("BENGK106", "COMMUNICATIVE ENGLISH", 1, "AEC"),
            ("BPWSK106", "PROFESSIONAL WRITING SKILLS IN ENGLISH", 1, "AEC"),
            ("BICOK107", "INDIAN CONSTITUTION", 1, "HSMC"),
            ("BKSKK107", "SAMSKRUTIKA KANNADA", 1, "HSMC"),
            ("BKBKK107", "BALAKE KANNADA", 1, "HSMC"),
            ("BIDTK158", "INNOVATION AND DESIGN THINKING", 1, "SDC"),
            ("BSFHK158", "SCIENTIFIC FOUNDATIONS OF HEALTH", 1, "SDC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(2),
        rows: &[
            ("BMATS201", "MATHEMATICS-II FOR CSE STREAM", 4, "ASC"),
            ("BCHES202", "APPLIED CHEMISTRY FOR CSE STREAM", 4, "ASC"),
            ("BCEDK203", "COMPUTER-AIDED ENGINEERING DRAWING", 3, "ESC"),
            ("BESCK204A", "INTRODUCTION TO CIVIL ENGINEERING", 3, "ESC-II"),
            ("BESCK204B", "INTRODUCTION TO ELECTRICAL ENGINEERING", 3, "ESC-II"),
            ("BESCK204C", "INTRODUCTION TO ELECTRONICS COMMUNICATION", 3, "ESC-II"),
            ("BESCK204D", "INTRODUCTION TO MECHANICAL ENGINEERING", 3, "ESC-II"),
            ("BESCK204E", "INTRODUCTION TO C PROGRAMMING", 3, "ESC-II"),
            ("BETCK205A", "SMART MATERIALS AND SYSTEMS", 3, "ETC-II"),
            ("BETCK205B", "GREEN BUILDINGS", 3, "ETC-II"),
            ("BETCK205C", "INTRODUCTION TO NANO TECHNOLOGY", 3, "ETC-II"),
            ("BETCK205D", "INTRODUCTION TO SUSTAINABLE ENGINEERING", 3, "ETC-II"),
            ("BETCK205E", "RENEWABLE ENERGY SOURCES", 3, "ETC-II"),
            ("BETCK205F", "WASTE MANAGEMENT", 3, "ETC-II"),
            ("BETCK205G", "EMERGING APPLICATIONS OF BIOSENSORS", 3, "ETC-II"),
            ("BETCK205H", "INTRODUCTION TO INTERNET OF THINGS (IOT)", 3, "ETC-II"),
            ("BETCK205I", "INTRODUCTION TO CYBER SECURITY", 3, "ETC-II"),
            ("BETCK205J", "INTRODUCTION TO EMBEDDED SYSTEM", 3, "ETC-II"),
            ("BPLCK205A", "INTRODUCTION TO WEB PROGRAMMING", 3, "PLC-II"),
            ("BPLCK205B", "INTRODUCTION TO PYTHON PROGRAMMING", 3, "PLC-II"),
            ("BPLCK205C", "BASICS OF JAVA PROGRAMMING", 3, "PLC-II"),
            ("BPLCK205D", "INTRODUCTION TO C++ PROGRAMMING", 3, "PLC-II"),
            ("BENGK206", "COMMUNICATIVE ENGLISH", 1, "AEC"),
            ("BPWSK206", "PROFESSIONAL WRITING SKILLS IN ENGLISH", 1, "AEC"),
            ("BICOK207", "INDIAN CONSTITUTION", 1, "HSMS"),
            ("BKSKK207", "SAMSKRUTIKA KANNADA", 1, "HSMS"),
            ("BKBKK207", "BALAKE KANNADA", 1, "HSMS"),
            ("BIDTK258", "INNOVATION AND DESIGN THINKING", 1, "SDC"),
            ("BSFHK258", "SCIENTIFIC FOUNDATIONS OF HEALTH", 1, "SDC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(3),
        rows: &[
            ("BCS301", "MATHEMATICS FOR COMPUTER SCIENCE", 4, "PCC"),
            ("BCS302", "DIGITAL DESIGN & COMPUTER ORGANIZATION", 4, "IPCC"),
            ("BCS303", "OPERATING SYSTEMS", 4, "IPCC"),
            ("BCS304", "DATA STRUCTURES AND APPLICATIONS", 3, "PCC"),
            ("BCSL305", "DATA STRUCTURES LAB", 1, "PCCL"),
            ("BCS306A", "OBJECT ORIENTED PROGRAMMING WITH JAVA", 3, "ESC/ETC/PLC"),
            ("BCS306B", "OBJECT ORIENTED PROGRAMMING WITH C++", 3, "ESC/ETC/PLC"),
            ("BSCK307", "SOCIAL CONNECT AND RESPONSIBILITY", 1, "UHV"),
            ("BCSL358A", "DATA ANALYTICS WITH EXCEL", 1, "AEC/SEC"),
            ("BCSL358B", "R PROGRAMMING", 1, "AEC/SEC"),
            ("BCSL358C", "PROJECT MANAGEMENT WITH GIT", 1, "AEC/SEC"),
            ("BCSL358D", "DATA VISUALIZATION WITH PYTHON", 1, "AEC/SEC"),
            ("BCS358D", "DATA VISUALIZATION WITH PYTHON", 1, "AEC/SEC"),
            ("BNSK359", "NATIONAL SERVICE SCHEME (NSS)", 0, "MC"),
            ("BPEK359", "PHYSICAL EDUCATION (SPORTS AND ATHLETICS)", 0, "MC"),
            ("BYOK359", "YOGA", 0, "MC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(4),
        rows: &[
            ("BCS401", "ANALYSIS & DESIGN OF ALGORITHMS", 3, "PCC"),
            ("BCS402", "MICROCONTROLLERS", 4, "IPCC"),
            ("BCS403", "DATABASE MANAGEMENT SYSTEMS", 4, "IPCC"),
            ("BCSL404", "ANALYSIS & DESIGN OF ALGORITHMS LAB", 1, "PCCL"),
            ("BBOC407", "BIOLOGY FOR COMPUTER ENGINEERS", 2, "OE"),
            ("BUHK408", "UNIVERSAL HUMAN VALUES COURSE", 1, "UHV"),
            ("BCS405A", "DISCRETE MATHEMATICAL STRUCTURES", 3, "ESC"),
            ("BCS456A", "GREEN IT AND SUSTAINABILITY", 1, "AEC/SEC"),
            ("BCS456B", "CAPACITY PLANNING FOR IT", 1, "AEC/SEC"),
            ("BCS456C", "UI/UX", 1, "AEC/SEC"),
            ("BCSL456D", "TECHNICAL WRITING USING LATEX", 1, "AEC/SEC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(5),
        rows: &[
            ("BCS501", "SOFTWARE ENGINEERING & PROJECT MANAGEMENT", 4, "PCC"),
            ("BCS502", "COMPUTER NETWORKS", 4, "IPCC"),
            ("BCS503", "THEORY OF COMPUTATION", 4, "PCC"),
            ("BCSL504", "WEB TECHNOLOGY LAB", 1, "PCCL"),
            ("BCS515x", "PROFESSIONAL ELECTIVE COURSE", 3, "PEC"),
            ("BCS586", "MINI PROJECT", 2, "PROJ"),
            ("BRMK557", "RESEARCH METHODOLOGY AND IPR", 3, "AEC"),
            ("BCS508", "ENVIRONMENTAL STUDIES AND E-WASTE MANAGEMENT", 1, "HSMS"),
            ("BNSK559", "NATIONAL SERVICE SCHEME (NSS)", 0, "MC"),
            ("BPEK559", "PHYSICAL EDUCATION (SPORTS AND ATHLETICS)", 0, "MC"),
            ("BYOK559", "YOGA", 0, "MC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(6),
        rows: &[
            ("BCS601", "CLOUD COMPUTING (OPEN STACK / GOOGLE)", 4, "IPCC"),
            ("BCS602", "MACHINE LEARNING", 4, "PCC"),
            ("BXX613x", "PROFESSIONAL ELECTIVE COURSE", 3, "PEC"),
            ("BXX654x", "OPEN ELECTIVE COURSE", 3, "OEC"),
            ("BCS685", "PROJECT PHASE I", 2, "PROJ"),
            ("BCSL606", "MACHINE LEARNING LAB", 1, "PCCL"),
            ("BXX657x", "ABILITY ENHANCEMENT COURSE / SKILL DEVELOPMENT COURSE V", 1, "AEC/SDC"),
            ("BNSK658", "NATIONAL SERVICE SCHEME (NSS)", 0, "MC"),
            ("BPEK658", "PHYSICAL EDUCATION (SPORTS AND ATHLETICS)", 0, "MC"),
            ("BYOK658", "YOGA", 0, "MC"),
            ("BIKS609", "INDIAN KNOWLEDGE SYSTEM", 0, "MC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(7),
        rows: &[
            ("BCS701", "INTERNET OF THINGS", 4, "IPCC"),
            ("BCS702", "PARALLEL COMPUTING", 4, "IPCC"),
            ("BCS703", "CRYPTOGRAPHY & NETWORK SECURITY", 4, "PCC"),
            ("BCS714x", "PROFESSIONAL ELECTIVE COURSE", 3, "PEC"),
            ("BCS755x", "OPEN ELECTIVE COURSE", 3, "OEC"),
            ("BCS786", "MAJOR PROJECT PHASE-II", 6, "PROJ"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Term(8),
        rows: &[
            ("BCS801x", "PROFESSIONAL ELECTIVE (ONLINE COURSES) ONLY THROUGH NPTEL", 3, "PEC"),
            ("BCS802x", "OPEN ELECTIVE (ONLINE COURSES) ONLY THROUGH NPTEL", 3, "OEC"),
            ("BCS803", "INTERNSHIP (INDUSTRY / RESEARCH) (14 - 20 WEEKS)", 10, "INT"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Pool("PEC"),
        rows: &[
            ("BCS613A", "BLOCKCHAIN TECHNOLOGY", 3, "PEC"),
            ("BCS613B", "COMPUTER VISION", 3, "PEC"),
            ("BCS613C", "COMPILER DESIGN", 3, "PEC"),
            ("BCS613D", "ADVANCED JAVA", 3, "PEC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Pool("OEC"),
        rows: &[
            ("BCS654A", "INTRODUCTION TO DATA STRUCTURES", 3, "OEC"),
            ("BIS654C", "MOBILE APPLICATION DEVELOPMENT", 3, "OEC"),
            ("BCS654B", "FUNDAMENTALS OF OPERATING SYSTEMS", 3, "OEC"),
            ("BAI654D", "INTRODUCTION TO ARTIFICIAL INTELLIGENCE", 3, "OEC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Cs,
        group: TermGroup::Pool("AEC_SEC"),
        rows: &[
            ("BISL657A", "TOSCA - AUTOMATED SOFTWARE TESTING", 1, "AEC/SEC"),
            ("BAIL657C", "GENERATIVE AI", 1, "AEC/SEC"),
            ("BCSL657B", "REACT", 1, "AEC/SEC"),
            ("BCSL657D", "DEVOPS", 1, "AEC/SEC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2022,
        program: Program::Ec,
        group: TermGroup::Term(1),
        rows: &[
            ("BMATS101", "MATHEMATICS-I FOR ECE STREAM", 4, "ASC"),
            ("BPHYS102", "APPLIED PHYSICS FOR ECE STREAM", 4, "ASC"),
            ("BEC101", "BASIC ELECTRONICS", 4, "ESC"),
            ("BEC102", "ELECTRONIC DEVICES", 4, "ESC"),
            ("BEC103", "DIGITAL ELECTRONICS", 4, "ESC"),
            ("BEC104", "ANALOG ELECTRONICS", 4, "ESC"),
            ("BEC105", "SIGNALS AND SYSTEMS", 4, "ESC"),
            ("BEC106", "COMMUNICATION SYSTEMS", 4, "ESC"),
            ("BEC107", "MICROWAVE ENGINEERING", 4, "ESC"),
            ("BEC108", "ANTENNA THEORY", 4, "ESC"),
            ("BEC109", "OPTICAL COMMUNICATION", 4, "ESC"),
            ("BEC110", "SATELLITE COMMUNICATION", 4, "ESC"),
            ("BEC111", "MOBILE COMMUNICATION", 4, "ESC"),
            ("BEC112", "WIRELESS COMMUNICATION", 4, "ESC"),
            ("BEC113", "NETWORK THEORY", 4, "ESC"),
            ("BEC114", "CONTROL SYSTEMS", 4, "ESC"),
            ("BEC115", "DIGITAL SIGNAL PROCESSING", 4, "ESC"),
            ("BEC116", "IMAGE PROCESSING", 4, "ESC"),
            ("BEC117", "SPEECH PROCESSING", 4, "ESC"),
            ("BEC118", "VIDEO PROCESSING", 4, "ESC"),
            ("BEC119", "AUDIO PROCESSING", 4, "ESC"),
            ("BEC120", "MULTIMEDIA PROCESSING", 4, "ESC"),
            ("BEC121", "REAL-TIME SYSTEMS", 4, "ESC"),
            ("BEC122", "EMBEDDED SYSTEMS", 4, "ESC"),
            ("BEC123", "VLSI DESIGN", 4, "ESC"),
            ("BEC124", "CMOS DESIGN", 4, "ESC"),
            ("BEC125", "ANALOG VLSI", 4, "ESC"),
            ("BEC126", "DIGITAL VLSI", 4, "ESC"),
            ("BEC127", "MIXED SIGNAL VLSI", 4, "ESC"),
            ("BEC128", "RF VLSI", 4, "ESC"),
            ("BEC129", "HIGH SPEED VLSI", 4, "ESC"),
            ("BEC130", "LOW POWER VLSI", 4, "ESC"),
            ("BEC131", "TESTING AND VERIFICATION", 4, "ESC"),
            ("BEC132", "DESIGN FOR TESTABILITY", 4, "ESC"),
            ("BEC133", "BUILT-IN SELF TEST", 4, "ESC"),
            ("BEC134", "SCAN DESIGN", 4, "ESC"),
            ("BEC135", "BOUNDARY SCAN", 4, "ESC"),
            ("BEC136", "MEMORY TESTING", 4, "ESC"),
            ("BEC137", "LOGIC TESTING", 4, "ESC"),
            ("BEC138", "FAULT SIMULATION", 4, "ESC"),
            ("BEC139", "FAULT MODELING", 4, "ESC"),
            ("BEC140", "FAULT DIAGNOSIS", 4, "ESC"),
            ("BEC141", "FAULT TOLERANCE", 4, "ESC"),
            ("BEC142", "RELIABILITY ENGINEERING", 4, "ESC"),
            ("BEC143", "MAINTAINABILITY ENGINEERING", 4, "ESC"),
            ("BEC144", "AVAILABILITY ENGINEERING", 4, "ESC"),
            ("BEC145", "SAFETY ENGINEERING", 4, "ESC"),
            ("BEC146", "SECURITY ENGINEERING", 4, "ESC"),
            ("BEC147", "PRIVACY ENGINEERING", 4, "ESC"),
            ("BEC148", "TRUST ENGINEERING", 4, "ESC"),
            ("BEC149", "RESILIENCE ENGINEERING", 4, "ESC"),
            ("BEC150", "ADAPTABILITY ENGINEERING", 4, "ESC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2021,
        program: Program::Cs,
        group: TermGroup::Term(1),
        rows: &[
            ("21MA101", "CALCULUS AND LINEAR ALGEBRA", 4, "ASC"),
            ("21PH101", "PHYSICS", 3, "ASC"),
            ("21CH101", "CHEMISTRY", 3, "ASC"),
            ("21EE101", "BASIC ELECTRICAL ENGINEERING", 3, "ESC"),
            ("21ME101", "ELEMENTS OF MECHANICAL ENGINEERING", 3, "ESC"),
            ("21CS101", "PROGRAMMING IN C", 3, "ESC"),
            ("21EG101", "ENGINEERING GRAPHICS", 1, "ESC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2021,
        program: Program::Cs,
        group: TermGroup::Term(3),
        rows: &[
            ("21MA301", "DISCRETE MATHEMATICS", 3, "ASC"),
            ("21CS301", "DATA STRUCTURES", 4, "ESC"),
            ("21CS302", "COMPUTER ORGANIZATION", 4, "ESC"),
            ("21CS303", "OBJECT ORIENTED PROGRAMMING WITH JAVA", 4, "ESC"),
            ("21CS304", "DATABASE MANAGEMENT SYSTEMS", 3, "ESC"),
            ("21CS305", "DATA STRUCTURES LABORATORY", 2, "ESC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2018,
        program: Program::Cs,
        group: TermGroup::Term(1),
        rows: &[
            ("18MA101", "CALCULUS AND LINEAR ALGEBRA", 4, "ASC"),
            ("18PH101", "PHYSICS", 3, "ASC"),
            ("18CH101", "CHEMISTRY", 3, "ASC"),
            ("18EE101", "BASIC ELECTRICAL ENGINEERING", 3, "ESC"),
            ("18ME101", "ELEMENTS OF MECHANICAL ENGINEERING", 3, "ESC"),
            ("18CS101", "PROGRAMMING IN C", 3, "ESC"),
            ("18EG101", "ENGINEERING GRAPHICS", 1, "ESC"),
        ],
    },
    TermTable {
        scheme: Scheme::Y2018,
        program: Program::Cs,
        group: TermGroup::Term(3),
        rows: &[
            ("18MA301", "DISCRETE MATHEMATICS", 3, "ASC"),
            ("18CS301", "DATA STRUCTURES", 4, "ESC"),
            ("18CS302", "COMPUTER ORGANIZATION", 4, "ESC"),
            ("18CS303", "OBJECT ORIENTED PROGRAMMING WITH JAVA", 4, "ESC"),
            ("18CS304", "DATABASE MANAGEMENT SYSTEMS", 3, "ESC"),
            ("18CS305", "DATA STRUCTURES LABORATORY", 2, "ESC"),
        ],
    },
];

/// Legacy credit table consulted when a code is absent from [`TABLES`].
pub(super) static FALLBACK_ROWS: &[(&str, &str, u32)] = &[
    ("BCS401", "ANALYSIS & DESIGN OF ALGORITHMS", 4),
    ("BCS402", "MICROCONTROLLERS", 4),
    ("BCS403", "DATABASE MANAGEMENT SYSTEMS", 4),
    ("BCSL404", "ANALYSIS & DESIGN OF ALGORITHMS LAB", 1),
    ("BBOC407", "BIOLOGY FOR COMPUTER ENGINEERS", 2),
    ("BUHK408", "UNIVERSAL HUMAN VALUES COURSE", 1),
    ("BYOK459", "YOGA", 0),
    ("BCS405A", "DISCRETE MATHEMATICAL STRUCTURES", 4),
    ("BCS456B", "CAPACITY PLANNING FOR IT", 1),
];
