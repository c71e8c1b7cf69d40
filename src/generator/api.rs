use std::fmt::Write;

use crate::classifier::type_classifier::TypeCategory;
use crate::generator::{GeneratedFile, TableNames};
use crate::parser::model::{FieldDefinition, TableSchema};

const FILTER_ITEM_DTO: &str = "\
import { ApiProperty } from '@nestjs/swagger';
import { IsString } from 'class-validator';
export class FilterItemDto {
  @IsString()
  @ApiProperty({
    description: 'Field name to be search on',
    type: 'string',
    example: 'name',
  })
  field: string;
  @IsString()
  @ApiProperty({
    description: 'Search value',
    type: 'string',
    example: 'Kowalski',
  })
  value: string;
}
";

const LIST_FILTER_REQUEST_DTO: &str = "\
import { ApiProperty } from '@nestjs/swagger';
import { IsArray, IsNotEmpty, IsNumber, IsString, IsOptional } from 'class-validator';
import { FilterItemDto } from './filter-item.dto';
export class ListFilterRequestDto {
  @IsArray()
  @ApiProperty({
    description: 'List filtered fields with search values',
    type: [FilterItemDto],
    required: false,
  })
  filter: FilterItemDto[];

  @IsString()
  @ApiProperty({
    description: 'Sort direction',
    type: 'string',
    enum: ['asc', 'desc', ''],
    example: 'asc',
  })
  sort_direction: string;

  @IsArray()
  @IsOptional()
  @ApiProperty({
    description: 'Fields to be sorted',
    type: 'array',
    items: {
      type: 'string',
    },
    example: ['name', 'surname'],
    required: false,
  })
  sort?: string[];

  @IsNotEmpty()
  @IsNumber()
  @ApiProperty({
    description: 'Page index',
    type: 'number',
    example: 1,
  })
  page_index: number;

  @IsNotEmpty()
  @IsNumber()
  @ApiProperty({
    description: 'Page size',
    type: 'number',
    example: 25,
  })
  page_size: number;
}
";

/// Responses every endpoint may produce besides its success case.
const COMMON_RESPONSES: &str = "\
  @ApiResponse({ status: HttpStatus.INTERNAL_SERVER_ERROR, description: 'Database error' })
  @ApiResponse({ status: HttpStatus.FORBIDDEN, description: 'Invalid credentials' })
  @ApiResponse({ status: HttpStatus.TOO_MANY_REQUESTS, description: 'Too many requests' })
";

/// Generate the NestJS module for `schema`.
pub fn generate_api(schema: &TableSchema) -> Vec<GeneratedFile> {
    let names = TableNames::new(schema.table_name());
    let module_dir = format!("api/{}", names.dash);

    vec![
        GeneratedFile::new(
            format!("{module_dir}/implement/{}.dto.ts", names.kebab),
            model_dto(schema, &names),
        ),
        GeneratedFile::new(
            format!("{module_dir}/implement/{}-list-response.dto.ts", names.kebab),
            list_response_dto(&names),
        ),
        GeneratedFile::new("api/shared/implement/filter-item.dto.ts", FILTER_ITEM_DTO),
        GeneratedFile::new(
            "api/shared/implement/list-filter-request.dto.ts",
            LIST_FILTER_REQUEST_DTO,
        ),
        GeneratedFile::new(
            format!("{module_dir}/{}.service.ts", names.dash),
            service(schema, &names),
        ),
        GeneratedFile::new(
            format!("{module_dir}/{}.controller.ts", names.dash),
            controller(schema, &names),
        ),
        GeneratedFile::new(
            format!("{module_dir}/{}.module.ts", names.dash),
            module(&names),
        ),
    ]
}

/// Decorators and declaration of one DTO property.
pub(crate) fn dto_property(field: &FieldDefinition) -> String {
    let category = field.category();
    let ts_type = category.ts_type();
    let mut out = String::new();

    if field.not_null() {
        out.push_str("  @IsNotEmpty()\n");
    }
    match category {
        TypeCategory::Numeric => out.push_str("  @IsNumber()\n"),
        TypeCategory::Textual => out.push_str("  @IsString()\n"),
        _ => {}
    }
    if !field.not_null() && matches!(category, TypeCategory::Numeric | TypeCategory::Textual) {
        out.push_str("  @IsOptional()\n");
    }
    writeln!(
        out,
        "  @ApiProperty({{\n    description: '{}',\n    type: '{ts_type}',\n    example: '',\n  }})",
        field.description()
    )
    .unwrap();
    let optional = if field.not_null() { "" } else { "?" };
    writeln!(out, "  {}{optional}: {ts_type};", field.name()).unwrap();
    out
}

fn model_dto(schema: &TableSchema, names: &TableNames) -> String {
    let mut out = String::from(
        "import { ApiProperty } from '@nestjs/swagger';\n\
         import { IsNotEmpty, IsNumber, IsString, IsOptional } from 'class-validator';\n",
    );
    writeln!(out, "export class {}Dto {{", names.pascal).unwrap();
    for (idx, field) in schema.fields().iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&dto_property(field));
    }
    out.push_str("}\n");
    out
}

fn list_response_dto(names: &TableNames) -> String {
    let TableNames { pascal, kebab, .. } = names;
    format!(
        "import {{ IsNumber }} from 'class-validator';
import {{ ApiProperty }} from '@nestjs/swagger';
import {{ {pascal}Dto }} from './{kebab}.dto';
export class {pascal}ListResponseDto {{
  @IsNumber()
  @ApiProperty({{
    description: 'Table item count',
    type: 'number',
    example: 1000,
  }})
  cnt: number;
  @ApiProperty({{
    description: 'Response item array',
    type: [{pascal}Dto],
    example: [],
  }})
  data: {pascal}Dto[];
}}
"
    )
}

fn service_method(signature: &str, result: &str, function: &str, argument: &str) -> String {
    format!(
        "  {signature}: Observable<{result}> {{
    return new Observable<{result}>((observer) => {{
      this.worker.query('SELECT {function}($1)', [{argument}]).subscribe({{
        next: (response) => {{
          if (response.error) {{
            observer.error(new HttpException(response.error, response.code));
            return;
          }}
          observer.next(response);
          observer.complete();
        }},
        error: (error) => observer.error(error),
      }});
    }});
  }}
"
    )
}

fn service(schema: &TableSchema, names: &TableNames) -> String {
    let TableNames {
        pascal,
        camel,
        kebab,
        ..
    } = names;
    let mut out = format!(
        "import {{ HttpException, Injectable }} from '@nestjs/common';
import {{ Observable }} from 'rxjs';
import {{ {pascal}Dto }} from './implement/{kebab}.dto';
import {{ {pascal}ListResponseDto }} from './implement/{kebab}-list-response.dto';
import {{ ListFilterRequestDto }} from '../shared/implement/list-filter-request.dto';
import {{ DatabaseWorker }} from '../shared/db.worker.service';
import {{ AppLogger }} from '../shared/app-logger';

@Injectable()
export class {pascal}Service {{
  constructor(
    private worker: DatabaseWorker,
    private logger: AppLogger,
  ) {{
    this.logger.setContext('{pascal}Service');
  }}

"
    );
    let methods = [
        service_method(
            "list(filter: ListFilterRequestDto)",
            &format!("{pascal}ListResponseDto"),
            &schema.function_name("list"),
            "filter",
        ),
        service_method(
            "get(id: number)",
            &format!("{pascal}Dto"),
            &schema.function_name("get"),
            "id",
        ),
        service_method(
            &format!("save({camel}: {pascal}Dto)"),
            "any",
            &schema.function_name("save"),
            &format!("JSON.stringify({camel})"),
        ),
        service_method(
            "delete(id: number)",
            "any",
            &schema.function_name("delete"),
            "id",
        ),
    ];
    out.push_str(&methods.join("\n"));
    out.push_str("}\n");
    out
}

fn controller(schema: &TableSchema, names: &TableNames) -> String {
    let TableNames {
        pascal,
        camel,
        dash,
        kebab,
    } = names;
    let table = schema.table_name();
    format!(
        "import {{ ApiBearerAuth, ApiResponse, ApiTags }} from '@nestjs/swagger';
import {{
  Body, Controller, Delete, Get, HttpCode, HttpStatus, Param, Post, UseGuards,
}} from '@nestjs/common';
import {{ Observable }} from 'rxjs';
import {{ AuthGuard }} from '../shared/guards/auth.guard';
import {{ {pascal}Dto }} from './implement/{kebab}.dto';
import {{ {pascal}ListResponseDto }} from './implement/{kebab}-list-response.dto';
import {{ ListFilterRequestDto }} from '../shared/implement/list-filter-request.dto';
import {{ {pascal}Service }} from './{dash}.service';

@ApiTags('{table}')
@ApiBearerAuth('Bearer')
@UseGuards(AuthGuard)
@Controller('{table}')
export class {pascal}Controller {{
  constructor(
    private {camel}Service: {pascal}Service,
  ) {{}}

  @Post('list')
  @HttpCode(HttpStatus.OK)
{COMMON_RESPONSES}  @ApiResponse({{ status: HttpStatus.OK, description: 'Response with list', type: {pascal}ListResponseDto }})
  list(@Body() filter: ListFilterRequestDto): Observable<{pascal}ListResponseDto> {{
    return this.{camel}Service.list(filter);
  }}

  @Get(':id')
  @HttpCode(HttpStatus.OK)
{COMMON_RESPONSES}  @ApiResponse({{ status: HttpStatus.NOT_FOUND, description: 'Item not found' }})
  @ApiResponse({{ status: HttpStatus.OK, description: 'Response description', type: {pascal}Dto }})
  get(@Param('id') id: number): Observable<{pascal}Dto> {{
    return this.{camel}Service.get(id);
  }}

  @Post()
  @HttpCode(HttpStatus.OK)
{COMMON_RESPONSES}  @ApiResponse({{ status: HttpStatus.NOT_FOUND, description: 'Item not found' }})
  @ApiResponse({{ status: HttpStatus.OK, description: 'Response with id' }})
  save(@Body() {camel}: {pascal}Dto) {{
    return this.{camel}Service.save({camel});
  }}

  @Delete(':id')
  @HttpCode(HttpStatus.OK)
{COMMON_RESPONSES}  @ApiResponse({{ status: HttpStatus.NOT_FOUND, description: 'Item not found' }})
  @ApiResponse({{ status: HttpStatus.OK, description: 'Deleted' }})
  delete(@Param('id') id: number) {{
    return this.{camel}Service.delete(id);
  }}
}}
"
    )
}

fn module(names: &TableNames) -> String {
    let TableNames { pascal, dash, .. } = names;
    format!(
        "import {{ Module }} from '@nestjs/common';
import {{ SharedModule }} from '../shared/shared.module';
import {{ {pascal}Service }} from './{dash}.service';
import {{ {pascal}Controller }} from './{dash}.controller';

@Module({{
  imports: [SharedModule],
  providers: [{pascal}Service],
  exports: [{pascal}Service],
  controllers: [{pascal}Controller],
}})
export class {pascal}Module {{}}
"
    )
}
