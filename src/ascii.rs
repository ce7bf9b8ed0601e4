pub const ASCII: &str = r#"
    .:::::.   .:::::.
  .:::::::::.:::::::::.
 :::::::::::::::::::::::
 :::::::::::::::::::::::
 ':::::::::::::::::::::'
   ':::::::::::::::::'
     ':::::::::::::'
       ':::::::::'
         ':::::'
           ':'
"#;
